//! Pluggable path selection.
//!
//! A [`PathStrategy`] turns a coupling graph into a [`Path`]. Every strategy
//! returns a graph-valid path: consecutive qubits are coupled, no qubit
//! repeats, and the length never exceeds the device size.

mod greedy;
mod random;
mod shortest;

pub use greedy::{GreedyLongest, LookaheadGreedy};
pub use random::RandomizedGreedy;
pub use shortest::ShortestPath;

use crate::error::TopologyResult;
use crate::graph::CouplingGraph;
use crate::path::Path;

/// Selects a path through a coupling graph.
pub trait PathStrategy: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Select a path.
    fn select(&self, graph: &CouplingGraph) -> TopologyResult<Path>;
}

/// Walk from `start` without backtracking, letting `pick` choose among the
/// unvisited neighbours (given in ascending order) at every step.
pub(crate) fn walk(
    graph: &CouplingGraph,
    start: u32,
    mut pick: impl FnMut(&[u32], &[bool]) -> u32,
) -> Vec<u32> {
    let mut visited = vec![false; graph.num_qubits() as usize];
    let mut walk = vec![start];
    visited[start as usize] = true;
    let mut current = start;

    loop {
        let candidates: Vec<u32> = graph
            .neighbors(current)
            .into_iter()
            .filter(|&n| !visited[n as usize])
            .collect();
        if candidates.is_empty() {
            break;
        }
        let next = pick(&candidates, &visited);
        visited[next as usize] = true;
        walk.push(next);
        current = next;
    }
    walk
}

/// Qubits with at most `max_degree` couplings, ascending.
pub(crate) fn edge_nodes(graph: &CouplingGraph, max_degree: usize) -> Vec<u32> {
    (0..graph.num_qubits())
        .filter(|&q| graph.degree(q) <= max_degree)
        .collect()
}
