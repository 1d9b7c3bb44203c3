use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{PathStrategy, edge_nodes, walk};
use crate::error::{TopologyError, TopologyResult};
use crate::graph::CouplingGraph;
use crate::path::Path;

/// Repeated randomized greedy walks.
///
/// Each restart picks a random boundary qubit and then a random unvisited
/// neighbour at every step. The longest walk is kept. The generator is
/// seeded, so a given seed always yields the same path on the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomizedGreedy {
    /// Number of walks.
    pub restarts: usize,
    /// RNG seed.
    pub seed: u64,
    /// Highest degree a qubit may have to be used as a start.
    pub max_start_degree: usize,
}

impl RandomizedGreedy {
    /// `restarts` walks seeded with `seed`.
    pub fn new(restarts: usize, seed: u64) -> Self {
        Self {
            restarts,
            seed,
            max_start_degree: 2,
        }
    }
}

impl Default for RandomizedGreedy {
    fn default() -> Self {
        Self::new(64, 0)
    }
}

impl PathStrategy for RandomizedGreedy {
    fn name(&self) -> &str {
        "random"
    }

    fn select(&self, graph: &CouplingGraph) -> TopologyResult<Path> {
        let starts = edge_nodes(graph, self.max_start_degree);
        if starts.is_empty() {
            return Err(TopologyError::NoStartCandidates {
                max_degree: self.max_start_degree,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Vec<u32> = vec![];
        for restart in 0..self.restarts.max(1) {
            let start = *starts.choose(&mut rng).unwrap_or(&starts[0]);
            let candidate = walk(graph, start, |candidates, _| {
                *candidates.choose(&mut rng).unwrap_or(&candidates[0])
            });
            if candidate.len() > best.len() {
                debug!(restart, length = candidate.len(), "New longest random walk");
                best = candidate;
            }
        }

        info!(
            "Randomized path covers {}/{} qubits after {} restarts",
            best.len(),
            graph.num_qubits(),
            self.restarts.max(1)
        );
        Path::new(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_path() {
        let graph = CouplingGraph::heavy_hex(3, 15);
        let a = RandomizedGreedy::new(16, 7).select(&graph).unwrap();
        let b = RandomizedGreedy::new(16, 7).select(&graph).unwrap();
        assert_eq!(a, b);
        a.validate(&graph).unwrap();
    }

    #[test]
    fn test_zero_restarts_still_walks_once() {
        let graph = CouplingGraph::linear(4);
        let path = RandomizedGreedy::new(0, 1).select(&graph).unwrap();
        // Both ends of a line walk the full line.
        assert_eq!(path.len(), 4);
    }
}
