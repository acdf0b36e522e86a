//! Observer seam for status display, logging and recording.
//!
//! The solver never prints. Anything that wants to watch a run implements
//! [`SolverObserver`] and is handed to [`crate::AntSolver::solve_with`].

use serde::{Deserialize, Serialize};

/// Snapshot of run state passed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepProgress {
    /// Zero-based index of the sweep in progress (or just completed)
    pub sweep: usize,
    /// Index of the ant that just acted; equals the ant count after a sweep
    pub ant: usize,
    /// Best total cost observed so far
    pub cost_best: usize,
    /// Total cost of the live coloring. Only recomputed at the end of a
    /// sweep; during a sweep it holds the previous sweep's value.
    pub curr_cost: usize,
}

/// Callbacks invoked by the solver loop. Both default to no-ops.
pub trait SolverObserver {
    /// Called after each ant has moved and recolored.
    fn on_ant_step(&mut self, _progress: &SweepProgress) {}

    /// Called once after each completed sweep.
    fn on_sweep(&mut self, _progress: &SweepProgress) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SolverObserver for NoopObserver {}
