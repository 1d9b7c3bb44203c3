//! The undirected coupling graph of a device.

use std::collections::VecDeque;

use petgraph::algo::has_path_connecting;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use rustc_hash::FxHashMap;

use crate::error::{TopologyError, TopologyResult};

/// Hardware connectivity: nodes are physical qubits, edges are coupled pairs.
///
/// Every qubit `0..num_qubits` is a node even when it has no couplings.
/// Edges are undirected and unique; adding `(a, b)` after `(b, a)` is a no-op.
/// Neighbour queries return ascending indices so that every search built on
/// top of the graph is deterministic regardless of edge insertion order.
#[derive(Debug, Clone)]
pub struct CouplingGraph {
    graph: UnGraphMap<u32, ()>,
    num_qubits: u32,
    name: Option<String>,
}

impl CouplingGraph {
    /// Create a graph with `num_qubits` isolated qubits.
    pub fn new(num_qubits: u32) -> Self {
        let mut graph = UnGraphMap::with_capacity(num_qubits as usize, 0);
        for q in 0..num_qubits {
            graph.add_node(q);
        }
        Self {
            graph,
            num_qubits,
            name: None,
        }
    }

    /// Build a graph from an edge list.
    ///
    /// Directed duplicates collapse into one undirected edge. Self-loops and
    /// indices outside the device are rejected.
    pub fn from_edges(
        num_qubits: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> TopologyResult<Self> {
        let mut graph = Self::new(num_qubits);
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Attach a device name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Couple two qubits.
    pub fn add_edge(&mut self, a: u32, b: u32) -> TopologyResult<()> {
        self.check_qubit(a)?;
        self.check_qubit(b)?;
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        self.graph.add_edge(a, b, ());
        Ok(())
    }

    /// Fail with [`TopologyError::UnknownQubit`] unless `qubit` is on the device.
    pub fn check_qubit(&self, qubit: u32) -> TopologyResult<()> {
        if qubit < self.num_qubits {
            Ok(())
        } else {
            Err(TopologyError::UnknownQubit {
                qubit,
                num_qubits: self.num_qubits,
            })
        }
    }

    /// Device name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of undirected couplings.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `qubit` is on the device.
    #[inline]
    pub fn contains(&self, qubit: u32) -> bool {
        qubit < self.num_qubits
    }

    /// Whether two qubits are directly coupled.
    #[inline]
    pub fn is_coupled(&self, a: u32, b: u32) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Number of couplings of `qubit` (zero for unknown qubits).
    pub fn degree(&self, qubit: u32) -> usize {
        if self.contains(qubit) {
            self.graph.neighbors(qubit).count()
        } else {
            0
        }
    }

    /// Neighbours of `qubit` in ascending order.
    pub fn neighbors(&self, qubit: u32) -> Vec<u32> {
        if !self.contains(qubit) {
            return vec![];
        }
        let mut neighbors: Vec<u32> = self.graph.neighbors(qubit).collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// All couplings as `(low, high)` pairs, sorted.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| (a.min(b), a.max(b)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Whether `to` can be reached from `from`.
    pub fn is_reachable(&self, from: u32, to: u32) -> bool {
        self.contains(from)
            && self.contains(to)
            && has_path_connecting(&self.graph, from, to, None)
    }

    /// Shortest path from `from` to `to` by breadth-first search.
    ///
    /// Neighbours are expanded in ascending order, so among equally short
    /// paths the lexicographically smallest is returned. `None` when either
    /// endpoint is unknown or the two are disconnected.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut predecessor: FxHashMap<u32, u32> = FxHashMap::default();
        let mut queue = VecDeque::from([from]);
        predecessor.insert(from, from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if predecessor.contains_key(&neighbor) {
                    continue;
                }
                predecessor.insert(neighbor, current);
                if neighbor == to {
                    let mut path = vec![to];
                    let mut node = to;
                    while node != from {
                        node = predecessor[&node];
                        path.push(node);
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbor);
            }
        }
        None
    }

    /// Number of couplings on the shortest path, if connected.
    pub fn distance(&self, from: u32, to: u32) -> Option<usize> {
        self.shortest_path(from, to).map(|p| p.len() - 1)
    }

    /// Connected components, each sorted, ordered by their smallest qubit.
    pub fn components(&self) -> Vec<Vec<u32>> {
        let mut seen = vec![false; self.num_qubits as usize];
        let mut components = vec![];
        for start in 0..self.num_qubits {
            if seen[start as usize] {
                continue;
            }
            let mut component = vec![];
            let mut dfs = Dfs::new(&self.graph, start);
            while let Some(node) = dfs.next(&self.graph) {
                seen[node as usize] = true;
                component.push(node);
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Whether every qubit can reach every other.
    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }

    // =========================================================================
    // Generators
    // =========================================================================

    /// A chain 0-1-2-...-(n-1).
    pub fn linear(n: u32) -> Self {
        let mut graph = Self::new(n);
        for i in 1..n {
            graph.graph.add_edge(i - 1, i, ());
        }
        graph.with_name(format!("linear:{n}"))
    }

    /// A closed chain.
    pub fn ring(n: u32) -> Self {
        let mut graph = Self::linear(n);
        if n > 2 {
            graph.graph.add_edge(n - 1, 0, ());
        }
        graph.with_name(format!("ring:{n}"))
    }

    /// A rectangular lattice, numbered row-major.
    ///
    /// `rows * cols` must fit in a `u32`; [`DevicePreset`](crate::DevicePreset)
    /// checks sizes before generating.
    pub fn grid(rows: u32, cols: u32) -> Self {
        let mut graph = Self::new(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let q = r * cols + c;
                if c + 1 < cols {
                    graph.graph.add_edge(q, q + 1, ());
                }
                if r + 1 < rows {
                    graph.graph.add_edge(q, q + cols, ());
                }
            }
        }
        graph.with_name(format!("grid:{rows}x{cols}"))
    }

    /// A heavy-hex lattice: `rows` chains of `row_len` qubits joined by
    /// bridge qubits every fourth column, alternating offset 0 and 2.
    ///
    /// Qubits are numbered row by row, with each row's bridges numbered
    /// directly after it.
    pub fn heavy_hex(rows: u32, row_len: u32) -> Self {
        let bridge_columns = |row: u32| -> Vec<u32> {
            let offset = if row % 2 == 0 { 0 } else { 2 };
            (offset..row_len).step_by(4).collect()
        };

        let mut edges = vec![];
        let mut next = 0u32;
        let mut pending: Vec<(u32, u32)> = vec![];

        for r in 0..rows {
            let start = next;
            next += row_len;
            for c in 1..row_len {
                edges.push((start + c - 1, start + c));
            }
            for (bridge, column) in pending.drain(..) {
                edges.push((bridge, start + column));
            }
            if r + 1 < rows {
                for column in bridge_columns(r) {
                    edges.push((start + column, next));
                    pending.push((next, column));
                    next += 1;
                }
            }
        }

        let mut graph = Self::new(next);
        for (a, b) in edges {
            graph.graph.add_edge(a, b, ());
        }
        graph.with_name(format!("heavy-hex:{rows}x{row_len}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_duplicates_collapse() {
        let graph = CouplingGraph::from_edges(3, [(0, 1), (1, 0), (1, 2), (2, 1)]).unwrap();
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_rejects_bad_edges() {
        assert!(matches!(
            CouplingGraph::from_edges(3, [(0, 3)]),
            Err(TopologyError::UnknownQubit { qubit: 3, .. })
        ));
        assert!(matches!(
            CouplingGraph::from_edges(3, [(1, 1)]),
            Err(TopologyError::SelfLoop(1))
        ));
    }

    #[test]
    fn test_isolated_qubits_are_nodes() {
        let graph = CouplingGraph::from_edges(4, [(0, 1)]).unwrap();
        assert_eq!(graph.num_qubits(), 4);
        assert_eq!(graph.degree(3), 0);
        assert_eq!(graph.components().len(), 3);
        assert!(!graph.is_connected());
    }

    #[test]
    fn test_neighbors_sorted() {
        let graph = CouplingGraph::from_edges(5, [(2, 4), (2, 0), (2, 3), (2, 1)]).unwrap();
        assert_eq!(graph.neighbors(2), vec![0, 1, 3, 4]);
        assert!(graph.neighbors(9).is_empty());
    }

    #[test]
    fn test_shortest_path_linear() {
        let graph = CouplingGraph::linear(6);
        assert_eq!(graph.shortest_path(1, 4), Some(vec![1, 2, 3, 4]));
        assert_eq!(graph.shortest_path(3, 3), Some(vec![3]));
        assert_eq!(graph.distance(0, 5), Some(5));
    }

    #[test]
    fn test_shortest_path_prefers_low_indices() {
        // Two equal routes 0-1-3 and 0-2-3.
        let graph = CouplingGraph::from_edges(4, [(0, 2), (2, 3), (0, 1), (1, 3)]).unwrap();
        assert_eq!(graph.shortest_path(0, 3), Some(vec![0, 1, 3]));
    }

    #[test]
    fn test_shortest_path_disconnected() {
        let graph = CouplingGraph::from_edges(4, [(0, 1), (2, 3)]).unwrap();
        assert_eq!(graph.shortest_path(0, 3), None);
        assert!(!graph.is_reachable(0, 3));
        assert!(graph.is_reachable(2, 3));
    }

    #[test]
    fn test_ring_and_grid() {
        let ring = CouplingGraph::ring(5);
        assert_eq!(ring.num_edges(), 5);
        assert!(ring.is_coupled(4, 0));

        let grid = CouplingGraph::grid(3, 4);
        assert_eq!(grid.num_qubits(), 12);
        assert_eq!(grid.num_edges(), 3 * 3 + 2 * 4);
        assert_eq!(grid.degree(5), 4);
    }

    #[test]
    fn test_heavy_hex_shape() {
        let graph = CouplingGraph::heavy_hex(3, 15);
        // 3 rows of 15 plus 4 bridges between each pair of rows.
        assert_eq!(graph.num_qubits(), 45 + 8);
        assert!(graph.is_connected());
        // Bridges have degree 2, row qubits at most 3.
        assert_eq!(graph.degree(15), 2);
        assert!((0..graph.num_qubits()).all(|q| graph.degree(q) <= 3));
        assert_eq!(graph.name(), Some("heavy-hex:3x15"));
    }
}
