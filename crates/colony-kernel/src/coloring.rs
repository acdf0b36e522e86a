//! Color policy: what an ant paints on the node it just reached.

use rand::Rng;

use crate::graph::{Color, Graph, NodeId};
use crate::state::GraphState;

/// Recolors a node given its neighbors' current colors.
///
/// With probability `pn` the node takes the color that minimizes its
/// conflict metric inside its star subgraph, otherwise a random one.
#[derive(Debug, Clone, Copy)]
pub struct ColorPolicy {
    pub pn: f64,
    pub order_2: bool,
}

impl ColorPolicy {
    pub fn new(pn: f64, order_2: bool) -> Self {
        Self { pn, order_2 }
    }

    /// Assign a new color to `node` and refresh the costs around it.
    /// Returns the color assigned.
    pub fn recolor<R: Rng>(&self, state: &mut GraphState, node: NodeId, rng: &mut R) -> Color {
        let color = if rng.random::<f64>() < self.pn {
            self.best_color(state, node)
        } else {
            rng.random_range(0..state.n_colors())
        };
        state.set_color(node, color);
        state.refresh_costs_around(node);
        color
    }

    /// The color minimizing the metric at `node`, smallest index on ties.
    ///
    /// Each candidate is scored against the same fixed neighbor colors.
    pub fn best_color(&self, state: &GraphState, node: NodeId) -> Color {
        let mut best = (0, usize::MAX);
        for color in 0..state.n_colors() {
            let metric = if self.order_2 {
                state.induced_local_potential(node, color)
            } else {
                state.induced_conflict_level(node, color)
            };
            if metric < best.1 {
                best = (color, metric);
            }
        }
        best.0
    }
}

/// Color every node uniformly at random from `0..n_colors`.
pub fn random_node_coloring<R: Rng>(graph: &Graph, n_colors: usize, rng: &mut R) -> Vec<Color> {
    (0..graph.node_count())
        .map(|_| rng.random_range(0..n_colors))
        .collect()
}
