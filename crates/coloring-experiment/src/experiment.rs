//! Experiment runner for coloring experiments.
//!
//! Orchestrates the run lifecycle:
//! 1. Build the solver for a graph and configuration
//! 2. Run sweeps until converged or out of budget, recording the trajectory
//! 3. Collect metrics and results

use anyhow::Result;
use chrono::Utc;
use colony_kernel::{AntSolver, Color, Graph, SolverConfig};
use tracing::info;

use crate::observer::{Both, HistoryObserver, TracingObserver};
use crate::results::{GridResults, NodeColor, RunConfig, RunResult};

/// Configuration for the experiment runner.
#[derive(Debug, Clone)]
pub struct ExperimentRunnerConfig {
    /// Solver settings shared by every run. A configured seed is offset by
    /// the trial number so trials differ but stay reproducible.
    pub solver: SolverConfig,
    /// Log sweep progress every this many sweeps
    pub report_every: usize,
}

impl Default for ExperimentRunnerConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            report_every: 1000,
        }
    }
}

/// Runs solver trials and turns them into [`RunResult`]s.
pub struct ExperimentRunner {
    config: ExperimentRunnerConfig,
}

impl ExperimentRunner {
    pub fn new(config: ExperimentRunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExperimentRunnerConfig {
        &self.config
    }

    /// Run a single trial on `graph`.
    pub fn run(&self, graph: &Graph, name: &str, trial: usize) -> Result<RunResult> {
        self.run_with(graph, name, trial, self.config.solver.clone(), None)
    }

    /// Run a single trial starting from `coloring`. Sets `pre_colored`.
    pub fn run_from(
        &self,
        graph: &Graph,
        name: &str,
        trial: usize,
        coloring: Vec<Color>,
    ) -> Result<RunResult> {
        let solver = SolverConfig {
            pre_colored: true,
            ..self.config.solver.clone()
        };
        self.run_with(graph, name, trial, solver, Some(coloring))
    }

    fn run_with(
        &self,
        graph: &Graph,
        name: &str,
        trial: usize,
        mut solver_config: SolverConfig,
        coloring: Option<Vec<Color>>,
    ) -> Result<RunResult> {
        solver_config.seed = solver_config
            .seed
            .map(|seed| seed.wrapping_add(trial as u64));

        let mut builder = AntSolver::builder(graph.clone(), solver_config.clone());
        if let Some(colors) = coloring {
            builder = builder.coloring(colors);
        }
        let mut solver = builder.build()?;

        let started_at = Utc::now();
        let mut observer = Both(
            TracingObserver::new(solver.initial_cost(), self.config.report_every),
            HistoryObserver::default(),
        );
        let outcome = solver.solve_with(&mut observer);
        let ended_at = Utc::now();

        let coloring = outcome
            .best
            .labeled(solver.graph())
            .into_iter()
            .map(|(node, color)| NodeColor {
                node: node.to_string(),
                color,
            })
            .collect();

        Ok(RunResult {
            config: RunConfig {
                graph: name.to_string(),
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                n_colors: solver.n_colors(),
                n_ants: solver.ants().len(),
                pc: solver_config.pc,
                pn: solver_config.pn,
                order_2: solver_config.order_2,
                trial,
                seed: outcome.seed,
            },
            started_at,
            ended_at,
            termination: outcome.termination,
            sweeps: outcome.sweeps,
            solved: outcome.is_solved(),
            initial_cost: outcome.initial_cost,
            final_cost: outcome.best.cost(),
            conflicting_edges: outcome.best.conflicting_edges(),
            elapsed_ms: outcome.elapsed.as_millis() as u64,
            cost_history: observer.1.cost_best,
            coloring,
        })
    }

    /// Run every ant count for `trials` trials each.
    pub fn run_grid(
        &self,
        graph: &Graph,
        name: &str,
        ant_counts: &[usize],
        trials: usize,
    ) -> Result<GridResults> {
        let mut results = GridResults::new();
        let total = ant_counts.len() * trials;
        let mut completed = 0;

        for &n_ants in ant_counts {
            let runner = ExperimentRunner::new(ExperimentRunnerConfig {
                solver: SolverConfig {
                    n_ants,
                    ..self.config.solver.clone()
                },
                report_every: self.config.report_every,
            });

            for trial in 0..trials {
                let result = runner.run(graph, name, trial)?;
                completed += 1;

                info!(
                    completed = completed,
                    total = total,
                    ants = n_ants,
                    trial = trial,
                    solved = result.solved,
                    sweeps = result.sweeps,
                    "Completed run"
                );
                results.add(result);
            }
        }

        results.compute_summary();
        Ok(results)
    }
}
