//! Colony Kernel: minimum-conflict graph coloring by wandering agents.
//!
//! A population of ants moves across an undirected graph. Each step an ant
//! relocates to a neighbor (usually the most conflicted one) and recolors the
//! node it lands on (usually with the locally least conflicting color). The
//! best coloring seen at the end of any sweep is retained.

pub mod coloring;
pub mod config;
pub mod error;
pub mod graph;
pub mod movement;
pub mod observer;
pub mod solver;
pub mod state;

pub use coloring::{ColorPolicy, random_node_coloring};
pub use config::SolverConfig;
pub use error::{KernelError, Result};
pub use graph::{Color, Graph, GraphBuilder, NodeId};
pub use movement::MovementPolicy;
pub use observer::{NoopObserver, SolverObserver, SweepProgress};
pub use solver::{AntSolver, AntSolverBuilder, SolutionSnapshot, SolveOutcome, Termination};
pub use state::GraphState;
