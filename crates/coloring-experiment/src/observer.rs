//! Observers that watch a run from the outside.

use colony_kernel::{SolverObserver, SweepProgress};
use tracing::{debug, trace};

/// Status display through `tracing`.
///
/// Per-sweep progress goes to `debug` every `report_every` sweeps, per-ant
/// progress to `trace`.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    initial_cost: usize,
    report_every: usize,
}

impl TracingObserver {
    pub fn new(initial_cost: usize, report_every: usize) -> Self {
        Self {
            initial_cost,
            report_every: report_every.max(1),
        }
    }

    fn gain(&self, cost_best: usize) -> f64 {
        if self.initial_cost == 0 {
            0.0
        } else {
            cost_best as f64 / self.initial_cost as f64 - 1.0
        }
    }
}

impl SolverObserver for TracingObserver {
    fn on_ant_step(&mut self, progress: &SweepProgress) {
        trace!(
            sweep = progress.sweep,
            ant = progress.ant,
            cost_best = progress.cost_best,
            "Ant step"
        );
    }

    fn on_sweep(&mut self, progress: &SweepProgress) {
        if (progress.sweep + 1) % self.report_every != 0 {
            return;
        }
        debug!(
            sweep = progress.sweep,
            cost_best = progress.cost_best,
            curr_cost = progress.curr_cost,
            gain = self.gain(progress.cost_best),
            "Sweep complete"
        );
    }
}

/// Records the cost trajectory of a run, one entry per sweep.
#[derive(Debug, Default, Clone)]
pub struct HistoryObserver {
    pub cost_best: Vec<usize>,
    pub curr_cost: Vec<usize>,
}

impl SolverObserver for HistoryObserver {
    fn on_sweep(&mut self, progress: &SweepProgress) {
        self.cost_best.push(progress.cost_best);
        self.curr_cost.push(progress.curr_cost);
    }
}

/// Forwards every callback to two observers.
#[derive(Debug, Default, Clone)]
pub struct Both<A, B>(pub A, pub B);

impl<A: SolverObserver, B: SolverObserver> SolverObserver for Both<A, B> {
    fn on_ant_step(&mut self, progress: &SweepProgress) {
        self.0.on_ant_step(progress);
        self.1.on_ant_step(progress);
    }

    fn on_sweep(&mut self, progress: &SweepProgress) {
        self.0.on_sweep(progress);
        self.1.on_sweep(progress);
    }
}
