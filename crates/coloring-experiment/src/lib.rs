//! Coloring Experiment: runs the ant-colony colorer on generated or loaded graphs.
//!
//! This crate wraps `colony-kernel` with the pieces needed for experiments:
//! - Seeded graph families and an edge-list loader
//! - Observers for status logging and cost trajectories
//! - Trial grids with JSON results and summary statistics

pub mod experiment;
pub mod generator;
pub mod loader;
pub mod observer;
pub mod results;
