//! The solver loop: sweeps of ants, best-snapshot tracking and stopping.
//!
//! ## Usage
//!
//! ```
//! use colony_kernel::{AntSolver, Graph, SolverConfig};
//!
//! let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let config = SolverConfig {
//!     n_colors: Some(2),
//!     n_ants: 2,
//!     max_iters: 10_000,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut solver = AntSolver::builder(graph, config).build().unwrap();
//! let outcome = solver.solve();
//! assert_eq!(outcome.best.cost(), 0);
//! ```

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::coloring::{ColorPolicy, random_node_coloring};
use crate::config::SolverConfig;
use crate::error::{KernelError, Result};
use crate::graph::{Color, Graph, NodeId};
use crate::movement::MovementPolicy;
use crate::observer::{NoopObserver, SolverObserver, SweepProgress};
use crate::state::GraphState;

/// Why a run stopped. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The best coloring has no conflicts
    Converged,
    /// The sweep budget is spent
    IterLimit,
    /// The wall-clock budget is spent
    TimeLimit,
}

impl Termination {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::IterLimit => "iter_limit",
            Self::TimeLimit => "time_limit",
        }
    }
}

/// An owned copy of a coloring and its total cost.
///
/// Never aliases the solver's live coloring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionSnapshot {
    colors: Vec<Color>,
    cost: usize,
}

impl SolutionSnapshot {
    fn capture(state: &GraphState, cost: usize) -> Self {
        Self {
            colors: state.colors().to_vec(),
            cost,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color(&self, node: NodeId) -> Color {
        self.colors[node]
    }

    /// Total cost, twice the number of conflicting edges.
    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn conflicting_edges(&self) -> usize {
        self.cost / 2
    }

    /// Colors keyed by the graph's node labels.
    pub fn labeled<'g>(&self, graph: &'g Graph) -> Vec<(&'g str, Color)> {
        self.colors
            .iter()
            .enumerate()
            .map(|(node, &color)| (graph.label(node), color))
            .collect()
    }
}

/// What a call to [`AntSolver::solve`] returns.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub best: SolutionSnapshot,
    /// Total completed sweeps of this solver
    pub sweeps: usize,
    pub termination: Termination,
    /// Total cost of the initial coloring
    pub initial_cost: usize,
    pub elapsed: Duration,
    /// Seed the run's random source was built from
    pub seed: u64,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        self.best.cost == 0
    }

    /// Relative change of the best cost against the initial cost
    /// (`-1.0` means every conflict was removed).
    pub fn gain(&self) -> f64 {
        if self.initial_cost == 0 {
            0.0
        } else {
            self.best.cost as f64 / self.initial_cost as f64 - 1.0
        }
    }
}

/// Builder for [`AntSolver`].
pub struct AntSolverBuilder {
    graph: Graph,
    config: SolverConfig,
    coloring: Option<Vec<Color>>,
}

impl AntSolverBuilder {
    pub fn new(graph: Graph, config: SolverConfig) -> Self {
        Self {
            graph,
            config,
            coloring: None,
        }
    }

    /// Initial coloring, required when `pre_colored` is set.
    pub fn coloring(mut self, colors: Vec<Color>) -> Self {
        self.coloring = Some(colors);
        self
    }

    /// Validate everything and set up the initial state.
    pub fn build(self) -> Result<AntSolver> {
        let config = self.config;
        config.validate()?;
        let time_budget = config.time_budget()?;

        let graph = self.graph;
        let n_colors = config.n_colors.unwrap_or(graph.max_degree() + 1);

        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::rng().random();
                debug!(seed = seed, "No seed configured, drew one");
                seed
            }
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let colors = if config.pre_colored {
            self.coloring.ok_or_else(|| {
                KernelError::Configuration(
                    "pre_colored is set but no initial coloring was supplied".to_string(),
                )
            })?
        } else {
            if self.coloring.is_some() {
                debug!("pre_colored is false, ignoring the supplied coloring");
            }
            random_node_coloring(&graph, n_colors, &mut rng)
        };

        let state = GraphState::new(graph, colors, n_colors)?;
        let node_count = state.graph().node_count();
        let n_ants = config.n_ants.min(node_count);
        let ants = rand::seq::index::sample(&mut rng, node_count, n_ants).into_vec();

        let initial_cost = state.total_cost();
        let best = SolutionSnapshot::capture(&state, initial_cost);

        Ok(AntSolver {
            movement: MovementPolicy::new(config.pc, config.order_2),
            color_policy: ColorPolicy::new(config.pn, config.order_2),
            state,
            ants,
            best,
            curr_cost: initial_cost,
            initial_cost,
            sweeps: 0,
            max_iters: config.max_iters,
            time_budget,
            rng,
            seed,
        })
    }
}

/// Multi-agent local search for minimum-conflict coloring.
///
/// Single-threaded by construction: each ant reads costs that earlier ants
/// in the same sweep may have just changed.
pub struct AntSolver {
    state: GraphState,
    ants: Vec<NodeId>,
    movement: MovementPolicy,
    color_policy: ColorPolicy,
    best: SolutionSnapshot,
    curr_cost: usize,
    initial_cost: usize,
    sweeps: usize,
    max_iters: usize,
    time_budget: Duration,
    rng: ChaCha8Rng,
    seed: u64,
}

impl AntSolver {
    pub fn builder(graph: Graph, config: SolverConfig) -> AntSolverBuilder {
        AntSolverBuilder::new(graph, config)
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn graph(&self) -> &Graph {
        self.state.graph()
    }

    /// Current ant positions, in processing order.
    pub fn ants(&self) -> &[NodeId] {
        &self.ants
    }

    pub fn best(&self) -> &SolutionSnapshot {
        &self.best
    }

    pub fn curr_cost(&self) -> usize {
        self.curr_cost
    }

    pub fn initial_cost(&self) -> usize {
        self.initial_cost
    }

    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn n_colors(&self) -> usize {
        self.state.n_colors()
    }

    /// Run sweeps until converged or out of budget.
    pub fn solve(&mut self) -> SolveOutcome {
        self.solve_with(&mut NoopObserver)
    }

    /// Run sweeps until converged or out of budget, reporting to `observer`.
    ///
    /// The sweep budget counts every sweep this solver has completed, across
    /// calls. The time budget starts fresh at each call.
    pub fn solve_with(&mut self, observer: &mut dyn SolverObserver) -> SolveOutcome {
        let started = Instant::now();
        let graph = self.state.graph();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            colors = self.state.n_colors(),
            ants = self.ants.len(),
            initial_cost = self.initial_cost,
            "Solving graph"
        );

        let termination = loop {
            if let Some(reason) = self.stop_reason(started.elapsed()) {
                break reason;
            }
            self.sweep_with(observer);
        };

        let elapsed = started.elapsed();
        match termination {
            Termination::Converged => info!(
                elapsed_ms = elapsed.as_millis() as u64,
                sweeps = self.sweeps,
                cost = self.best.cost,
                "Finished"
            ),
            _ => info!(
                reason = termination.name(),
                sweeps = self.sweeps,
                elapsed_ms = elapsed.as_millis() as u64,
                cost = self.best.cost,
                "Ended with conflicts remaining"
            ),
        }

        SolveOutcome {
            best: self.best.clone(),
            sweeps: self.sweeps,
            termination,
            initial_cost: self.initial_cost,
            elapsed,
            seed: self.seed,
        }
    }

    fn stop_reason(&self, elapsed: Duration) -> Option<Termination> {
        if self.best.cost == 0 {
            Some(Termination::Converged)
        } else if self.sweeps >= self.max_iters {
            Some(Termination::IterLimit)
        } else if elapsed >= self.time_budget {
            Some(Termination::TimeLimit)
        } else {
            None
        }
    }

    /// One sweep without an observer. Returns the cost after the sweep.
    pub fn sweep(&mut self) -> usize {
        self.sweep_with(&mut NoopObserver)
    }

    /// One sweep: every ant moves then recolors, in order. Returns the
    /// total cost after the sweep.
    ///
    /// Budgets are not checked here; only [`AntSolver::solve_with`] stops.
    pub fn sweep_with(&mut self, observer: &mut dyn SolverObserver) -> usize {
        let sweep = self.sweeps;

        for ant in 0..self.ants.len() {
            let from = self.ants[ant];
            // An ant stranded on an isolated node sits every step out.
            if self.state.graph().degree(from) > 0 {
                match self.movement.next_position(&self.state, from, &mut self.rng) {
                    Ok(next) => {
                        self.ants[ant] = next;
                        self.color_policy.recolor(&mut self.state, next, &mut self.rng);
                    }
                    Err(err) => {
                        debug_assert!(false, "ant {} failed to move from {}: {}", ant, from, err);
                        warn!(ant = ant, node = from, error = %err, "Ant failed to move");
                    }
                }
            }
            observer.on_ant_step(&SweepProgress {
                sweep,
                ant,
                cost_best: self.best.cost,
                curr_cost: self.curr_cost,
            });
        }

        self.curr_cost = self.state.total_cost();
        if self.curr_cost < self.best.cost {
            self.best = SolutionSnapshot::capture(&self.state, self.curr_cost);
            debug!(sweep = sweep, cost = self.curr_cost, "New best coloring");
        }
        self.sweeps += 1;

        observer.on_sweep(&SweepProgress {
            sweep,
            ant: self.ants.len(),
            cost_best: self.best.cost,
            curr_cost: self.curr_cost,
        });
        self.curr_cost
    }
}
