//! Immutable undirected graph with dense node ids.
//!
//! Node identifiers from the outside world (labels) are mapped once, at
//! construction, onto `0..node_count`. Everything downstream indexes plain
//! vectors by that dense id.

use std::collections::HashMap;

use crate::error::{KernelError, Result};

/// Dense node identifier, `0..node_count`.
pub type NodeId = usize;

/// Color index, `0..n_colors`.
pub type Color = usize;

/// A fixed, simple, undirected graph.
///
/// Neighbor lists are sorted ascending and free of duplicates. That order is
/// the iteration order used for every first-wins tie-break.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph over nodes `0..node_count`, labelled by their index.
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        for id in 0..node_count {
            builder.add_node(id.to_string());
        }
        for &(u, v) in edges {
            if u >= node_count || v >= node_count {
                return Err(KernelError::InvalidGraph(format!(
                    "edge ({}, {}) references a node outside 0..{}",
                    u, v, node_count
                )));
            }
            builder.add_edge_ids(u, v)?;
        }
        builder.build()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency[u].binary_search(&v).is_ok()
    }

    /// Nodes with no neighbors at all.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).filter(|&n| self.adjacency[n].is_empty())
    }

    /// External label of a node.
    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node]
    }

    /// Dense id of a label, if it exists.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Every edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }
}

/// Incremental, label-keyed construction of a [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<NodeId>>,
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning its dense id. Re-adding a label is a no-op.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = self.labels.len();
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected edge between two labels, registering them as needed.
    /// Duplicate edges are ignored.
    /// A rejected edge registers neither label.
    pub fn add_edge(&mut self, a: impl Into<String>, b: impl Into<String>) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(KernelError::InvalidGraph(format!("self-loop on node {}", a)));
        }
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.add_edge_ids(u, v)
    }

    // Duplicates are dropped in `build`.
    fn add_edge_ids(&mut self, u: NodeId, v: NodeId) -> Result<()> {
        if u == v {
            return Err(KernelError::InvalidGraph(format!(
                "self-loop on node {}",
                self.labels[u]
            )));
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        Ok(())
    }

    pub fn build(self) -> Result<Graph> {
        if self.labels.is_empty() {
            return Err(KernelError::InvalidGraph("graph has no nodes".to_string()));
        }

        let mut adjacency = self.adjacency;
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;

        Ok(Graph {
            adjacency,
            labels: self.labels,
            index: self.index,
            edge_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_sorts_and_dedups() {
        let graph = Graph::from_edges(4, &[(0, 3), (0, 1), (1, 0), (2, 0)]).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbors(0), &[1, 2, 3]);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.max_degree(), 3);
        assert!(graph.has_edge(3, 0));
        assert!(!graph.has_edge(1, 2));
    }

    #[test]
    fn test_edges_listed_once() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_rejects_self_loop_and_out_of_range() {
        assert!(matches!(
            Graph::from_edges(2, &[(1, 1)]),
            Err(KernelError::InvalidGraph(_))
        ));
        assert!(matches!(
            Graph::from_edges(2, &[(0, 2)]),
            Err(KernelError::InvalidGraph(_))
        ));
        assert!(matches!(
            Graph::from_edges(0, &[]),
            Err(KernelError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_builder_maps_labels_to_dense_ids() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("cell-a", "cell-b").unwrap();
        builder.add_edge("cell-b", "cell-c").unwrap();
        builder.add_node("lonely");
        let graph = builder.build().unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.node_id("cell-b"), Some(1));
        assert_eq!(graph.label(2), "cell-c");
        assert_eq!(graph.node_id("missing"), None);
        assert_eq!(graph.isolated_nodes().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_rejected_self_loop_leaves_no_node() {
        let mut builder = GraphBuilder::new();
        assert!(matches!(
            builder.add_edge("ghost", "ghost"),
            Err(KernelError::InvalidGraph(_))
        ));
        assert!(matches!(builder.build(), Err(KernelError::InvalidGraph(_))));

        let mut builder = GraphBuilder::new();
        builder.add_edge("a", "b").unwrap();
        assert!(builder.add_edge("c", "c").is_err());
        let graph = builder.build().unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node_id("c"), None);
    }

    #[test]
    fn test_builder_drops_repeated_edges() {
        let mut builder = GraphBuilder::new();
        for _ in 0..3 {
            builder.add_edge("hub", "spoke-1").unwrap();
            builder.add_edge("spoke-1", "hub").unwrap();
        }
        builder.add_edge("hub", "spoke-2").unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0]);
    }
}
