//! Graph state: the colors and cached conflict costs under search.
//!
//! Conflict metrics live here as methods on [`GraphState`]:
//! - `conflict_level`: neighbors sharing a node's color
//! - `local_potential`: order-2 view, a node's conflict level plus those of
//!   its neighbors
//! - `induced_*`: the same metrics inside the star subgraph `{n} ∪ N(n)` with
//!   `n` holding a trial color and every other node fixed

use crate::error::{KernelError, Result};
use crate::graph::{Color, Graph, NodeId};

/// Owns the immutable graph plus two parallel per-node arrays.
///
/// Invariant: `costs[n] == conflict_level(n)` for every node once any
/// color change has been followed by `refresh_costs_around`.
#[derive(Debug, Clone)]
pub struct GraphState {
    graph: Graph,
    n_colors: usize,
    colors: Vec<Color>,
    costs: Vec<usize>,
}

impl GraphState {
    /// Wrap a graph and a complete coloring, computing every cached cost.
    pub fn new(graph: Graph, colors: Vec<Color>, n_colors: usize) -> Result<Self> {
        if n_colors == 0 {
            return Err(KernelError::Configuration(
                "n_colors must be at least 1".to_string(),
            ));
        }
        if colors.len() != graph.node_count() {
            return Err(KernelError::Configuration(format!(
                "coloring has {} entries, graph has {} nodes",
                colors.len(),
                graph.node_count()
            )));
        }
        if let Some((node, &color)) = colors.iter().enumerate().find(|(_, c)| **c >= n_colors) {
            return Err(KernelError::Configuration(format!(
                "node {} has color {} outside 0..{}",
                graph.label(node),
                color,
                n_colors
            )));
        }

        let mut state = Self {
            costs: vec![0; colors.len()],
            graph,
            n_colors,
            colors,
        };
        for node in 0..state.colors.len() {
            state.costs[node] = state.conflict_level(node);
        }
        Ok(state)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn n_colors(&self) -> usize {
        self.n_colors
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color(&self, node: NodeId) -> Color {
        self.colors[node]
    }

    /// Cached conflict level of a node.
    pub fn cost(&self, node: NodeId) -> usize {
        self.costs[node]
    }

    pub fn costs(&self) -> &[usize] {
        &self.costs
    }

    /// Number of neighbors currently sharing `node`'s color.
    pub fn conflict_level(&self, node: NodeId) -> usize {
        let color = self.colors[node];
        self.graph
            .neighbors(node)
            .iter()
            .filter(|&&nei| self.colors[nei] == color)
            .count()
    }

    /// `conflict_level(node)` plus the conflict levels of all its neighbors.
    pub fn local_potential(&self, node: NodeId) -> usize {
        let around: usize = self
            .graph
            .neighbors(node)
            .iter()
            .map(|&nei| self.conflict_level(nei))
            .sum();
        self.conflict_level(node) + around
    }

    /// Conflict level of `center` if it held `color`, neighbors unchanged.
    pub fn induced_conflict_level(&self, center: NodeId, color: Color) -> usize {
        self.graph
            .neighbors(center)
            .iter()
            .filter(|&&nei| self.colors[nei] == color)
            .count()
    }

    /// Local potential of `center` holding `color`, measured inside the
    /// subgraph induced by `{center} ∪ N(center)`.
    ///
    /// A neighbor only counts conflicts with `center` and with other
    /// neighbors of `center`; edges leaving the star are invisible.
    pub fn induced_local_potential(&self, center: NodeId, color: Color) -> usize {
        let mut potential = self.induced_conflict_level(center, color);
        for &nei in self.graph.neighbors(center) {
            let nei_color = self.colors[nei];
            if nei_color == color {
                potential += 1;
            }
            potential += self
                .graph
                .neighbors(nei)
                .iter()
                .filter(|&&m| {
                    m != center && self.colors[m] == nei_color && self.graph.has_edge(center, m)
                })
                .count();
        }
        potential
    }

    /// Sum of cached costs. Always twice the number of conflicting edges.
    pub fn total_cost(&self) -> usize {
        self.costs.iter().sum()
    }

    /// Edges whose endpoints currently share a color.
    pub fn conflicting_edges(&self) -> usize {
        self.graph
            .edges()
            .filter(|&(u, v)| self.colors[u] == self.colors[v])
            .count()
    }

    pub(crate) fn set_color(&mut self, node: NodeId, color: Color) {
        debug_assert!(color < self.n_colors);
        self.colors[node] = color;
    }

    /// Recompute the cached cost of `node` and of each of its neighbors.
    pub(crate) fn refresh_costs_around(&mut self, node: NodeId) {
        self.costs[node] = self.conflict_level(node);
        for i in 0..self.graph.degree(node) {
            let nei = self.graph.neighbors(node)[i];
            self.costs[nei] = self.conflict_level(nei);
        }
    }
}
