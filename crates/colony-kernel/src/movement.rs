//! Movement policy: where an ant goes next.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{KernelError, Result};
use crate::graph::NodeId;
use crate::state::GraphState;

/// Chooses an ant's next node among the neighbors of its current one.
///
/// With probability `pc` the ant heads for the most conflicted neighbor,
/// otherwise it takes a uniformly random edge.
#[derive(Debug, Clone, Copy)]
pub struct MovementPolicy {
    pub pc: f64,
    pub order_2: bool,
}

impl MovementPolicy {
    pub fn new(pc: f64, order_2: bool) -> Self {
        Self { pc, order_2 }
    }

    /// Pick the next position for an ant standing on `from`.
    pub fn next_position<R: Rng>(
        &self,
        state: &GraphState,
        from: NodeId,
        rng: &mut R,
    ) -> Result<NodeId> {
        let neighbors = state.graph().neighbors(from);
        if neighbors.is_empty() {
            return Err(KernelError::InvalidGraph(format!(
                "node {} has no neighbors to move to",
                state.graph().label(from)
            )));
        }

        if rng.random::<f64>() < self.pc {
            Ok(self.worst_neighbor(state, from))
        } else {
            // Non-empty, checked above.
            Ok(*neighbors.choose(rng).unwrap_or(&neighbors[0]))
        }
    }

    /// Neighbor of `from` with the highest conflict metric.
    ///
    /// The metric is the cached cost, or the local potential in order-2
    /// mode. Ties go to the first maximal neighbor in adjacency order.
    pub fn worst_neighbor(&self, state: &GraphState, from: NodeId) -> NodeId {
        let mut best: Option<(NodeId, usize)> = None;
        for &nei in state.graph().neighbors(from) {
            let metric = if self.order_2 {
                state.local_potential(nei)
            } else {
                state.cost(nei)
            };
            match best {
                Some((_, top)) if metric <= top => {}
                _ => best = Some((nei, metric)),
            }
        }
        best.map(|(node, _)| node).unwrap_or(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Star with center 0 and leaves 1..=4.
    fn star(colors: Vec<usize>) -> GraphState {
        let graph = Graph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        GraphState::new(graph, colors, 3).unwrap()
    }

    #[test]
    fn test_worst_neighbor_prefers_highest_cost() {
        // Path 0-1-2-3 colored 0,1,1,1: costs 0,1,2,1.
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let state = GraphState::new(graph, vec![0, 1, 1, 1], 2).unwrap();
        let policy = MovementPolicy::new(0.5, false);

        assert_eq!(policy.worst_neighbor(&state, 1), 2);
        assert_eq!(policy.worst_neighbor(&state, 3), 2);
    }

    #[test]
    fn test_worst_neighbor_ties_go_to_first() {
        let state = star(vec![0, 1, 0, 0, 2]);
        let policy = MovementPolicy::new(0.5, false);

        // Leaves 2 and 3 both conflict with the center.
        assert_eq!(policy.worst_neighbor(&state, 0), 2);

        let calm = star(vec![0, 1, 2, 1, 2]);
        assert_eq!(policy.worst_neighbor(&calm, 0), 1);
    }

    #[test]
    fn test_worst_neighbor_order_2_uses_local_potential() {
        // Neighbors 1 and 2 of the center both have cost 1, but 2 leads into
        // the conflicted chain 2-3-4.
        let graph = Graph::from_edges(6, &[(0, 1), (0, 2), (1, 5), (2, 3), (3, 4)]).unwrap();
        let state = GraphState::new(graph, vec![0, 1, 2, 2, 2, 1], 3).unwrap();

        assert_eq!(state.cost(1), 1);
        assert_eq!(state.cost(2), 1);
        assert_eq!(state.local_potential(1), 2);
        assert_eq!(state.local_potential(2), 3);

        let plain = MovementPolicy::new(0.5, false);
        let order_2 = MovementPolicy::new(0.5, true);
        assert_eq!(plain.worst_neighbor(&state, 0), 1);
        assert_eq!(order_2.worst_neighbor(&state, 0), 2);
    }

    #[test]
    fn test_next_position_is_always_a_neighbor() {
        let state = star(vec![0, 0, 1, 2, 0]);
        let policy = MovementPolicy::new(0.3, false);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..200 {
            let next = policy.next_position(&state, 0, &mut rng).unwrap();
            assert!(state.graph().has_edge(0, next));

            let back = policy.next_position(&state, 3, &mut rng).unwrap();
            assert_eq!(back, 0);
        }
    }

    #[test]
    fn test_next_position_from_isolated_node_fails() {
        let graph = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let state = GraphState::new(graph, vec![0, 0, 0], 1).unwrap();
        let policy = MovementPolicy::new(0.5, false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(matches!(
            policy.next_position(&state, 2, &mut rng),
            Err(KernelError::InvalidGraph(_))
        ));
    }
}
