use tracing::{debug, info};

use super::{PathStrategy, edge_nodes, walk};
use crate::error::{TopologyError, TopologyResult};
use crate::graph::CouplingGraph;
use crate::path::Path;

/// Greedy "snake" walk looking for a long path.
///
/// Starts from every qubit with at most `max_start_degree` couplings (the
/// boundary of a heavy-hex lattice), always steps to the lowest-numbered
/// unvisited neighbour, and never backtracks. The longest walk wins; ties go
/// to the earliest start.
///
/// This is a heuristic. Longest simple path is NP-hard and a greedy walk can
/// dead-end well short of the optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyLongest {
    /// Highest degree a qubit may have to be used as a start.
    pub max_start_degree: usize,
}

impl Default for GreedyLongest {
    fn default() -> Self {
        Self {
            max_start_degree: 2,
        }
    }
}

impl PathStrategy for GreedyLongest {
    fn name(&self) -> &str {
        "greedy"
    }

    fn select(&self, graph: &CouplingGraph) -> TopologyResult<Path> {
        longest_over_starts(graph, self.max_start_degree, |graph, start| {
            walk(graph, start, |candidates, _| candidates[0])
        })
    }
}

/// Greedy walk that looks one step ahead.
///
/// Same start candidates as [`GreedyLongest`], but at each step prefers the
/// unvisited neighbour with the fewest unvisited neighbours of its own, so the
/// walk clears dead-end branches before moving on. Ties go to the lowest
/// index. Still a heuristic with no optimality guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookaheadGreedy {
    /// Highest degree a qubit may have to be used as a start.
    pub max_start_degree: usize,
}

impl Default for LookaheadGreedy {
    fn default() -> Self {
        Self {
            max_start_degree: 2,
        }
    }
}

impl PathStrategy for LookaheadGreedy {
    fn name(&self) -> &str {
        "lookahead"
    }

    fn select(&self, graph: &CouplingGraph) -> TopologyResult<Path> {
        longest_over_starts(graph, self.max_start_degree, |graph, start| {
            walk(graph, start, |candidates, visited| {
                let onward = |q: u32| {
                    graph
                        .neighbors(q)
                        .into_iter()
                        .filter(|&n| !visited[n as usize])
                        .count()
                };
                candidates
                    .iter()
                    .copied()
                    .min_by_key(|&q| (onward(q), q))
                    .unwrap_or(candidates[0])
            })
        })
    }
}

fn longest_over_starts(
    graph: &CouplingGraph,
    max_start_degree: usize,
    mut walk_from: impl FnMut(&CouplingGraph, u32) -> Vec<u32>,
) -> TopologyResult<Path> {
    let starts = edge_nodes(graph, max_start_degree);
    if starts.is_empty() {
        return Err(TopologyError::NoStartCandidates {
            max_degree: max_start_degree,
        });
    }
    debug!("Greedy walk over {} start candidates", starts.len());

    let mut best: Vec<u32> = vec![];
    for start in starts {
        let candidate = walk_from(graph, start);
        if candidate.len() > best.len() {
            best = candidate;
        }
    }

    info!(
        "Greedy path covers {}/{} qubits",
        best.len(),
        graph.num_qubits()
    );
    Path::new(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_covers_everything() {
        let graph = CouplingGraph::linear(10);
        let path = GreedyLongest::default().select(&graph).unwrap();
        assert_eq!(path.as_slice(), (0..10).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_no_start_candidates() {
        // Complete graph on 4 qubits: every degree is 3.
        let graph =
            CouplingGraph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert!(matches!(
            GreedyLongest::default().select(&graph),
            Err(TopologyError::NoStartCandidates { max_degree: 2 })
        ));
        let relaxed = GreedyLongest {
            max_start_degree: 3,
        };
        assert_eq!(relaxed.select(&graph).unwrap().len(), 4);
    }

    #[test]
    fn test_greedy_is_not_optimal() {
        // Branch 1-2-6-7 and branch 1-3-4-5 meet at qubit 1, with a pendant 0.
        // The longest path 7-6-2-1-3-4-5 has 7 qubits, but every greedy walk
        // reaches qubit 1 and then steps into the pendant or a single branch.
        let graph =
            CouplingGraph::from_edges(8, [(0, 1), (1, 2), (2, 6), (6, 7), (1, 3), (3, 4), (4, 5)])
                .unwrap();
        let greedy = GreedyLongest::default().select(&graph).unwrap();
        assert!(greedy.len() < 7);
        greedy.validate(&graph).unwrap();
    }

    #[test]
    fn test_lookahead_avoids_dead_end() {
        // Chain 0-1-2-3-4 with a pendant 5 on qubit 1.
        // Plain greedy from 0 goes 0-1-2-3-4, skipping 5. Lookahead from 0
        // visits the pendant first and ends short. Both pick the best start.
        let graph =
            CouplingGraph::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (1, 5)]).unwrap();
        let greedy = GreedyLongest::default().select(&graph).unwrap();
        let lookahead = LookaheadGreedy::default().select(&graph).unwrap();
        assert_eq!(greedy.len(), 5);
        assert_eq!(lookahead.len(), 5);
        lookahead.validate(&graph).unwrap();
    }

    #[test]
    fn test_heavy_hex_paths_are_valid() {
        let graph = CouplingGraph::heavy_hex(5, 15);
        for strategy in [
            &GreedyLongest::default() as &dyn PathStrategy,
            &LookaheadGreedy::default(),
        ] {
            let path = strategy.select(&graph).unwrap();
            path.validate(&graph).unwrap();
            assert!(path.len() <= graph.num_qubits() as usize);
            assert!(path.len() >= 15);
        }
    }
}
