//! Qubit paths through a coupling graph.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{TopologyError, TopologyResult};
use crate::graph::CouplingGraph;

/// An ordered, non-empty sequence of distinct physical qubits.
///
/// Construction only guarantees the sequence shape. Use
/// [`Path::validate`] to check it against a device; every path returned by a
/// [`PathStrategy`](crate::PathStrategy) already passes that check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Path(Vec<u32>);

impl Path {
    /// Create a path, rejecting empty sequences and repeated qubits.
    pub fn new(qubits: impl Into<Vec<u32>>) -> TopologyResult<Self> {
        let qubits = qubits.into();
        if qubits.is_empty() {
            return Err(TopologyError::EmptyPath);
        }
        let mut seen = FxHashSet::default();
        for &q in &qubits {
            if !seen.insert(q) {
                return Err(TopologyError::RepeatedQubit(q));
            }
        }
        Ok(Self(qubits))
    }

    /// Check that every qubit is on the device and consecutive qubits are coupled.
    pub fn validate(&self, graph: &CouplingGraph) -> TopologyResult<()> {
        for &q in &self.0 {
            graph.check_qubit(q)?;
        }
        for (from, to) in self.pairs() {
            if !graph.is_coupled(from, to) {
                return Err(TopologyError::NotAdjacent { from, to });
            }
        }
        Ok(())
    }

    /// Number of qubits on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First qubit.
    pub fn first(&self) -> u32 {
        self.0[0]
    }

    /// Last qubit.
    pub fn last(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    /// The qubits in order.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Consecutive `(src, dst)` pairs in path order.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Whether the path has at least `min_len` qubits.
    pub fn meets_threshold(&self, min_len: usize) -> bool {
        self.0.len() >= min_len
    }
}

impl TryFrom<Vec<u32>> for Path {
    type Error = TopologyError;

    fn try_from(qubits: Vec<u32>) -> TopologyResult<Self> {
        Self::new(qubits)
    }
}

impl From<Path> for Vec<u32> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, q) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{q}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_and_repeats() {
        assert!(matches!(Path::new(vec![]), Err(TopologyError::EmptyPath)));
        assert!(matches!(
            Path::new(vec![0, 1, 0]),
            Err(TopologyError::RepeatedQubit(0))
        ));
    }

    #[test]
    fn test_validate_against_graph() {
        let graph = CouplingGraph::linear(5);
        assert!(Path::new(vec![1, 2, 3]).unwrap().validate(&graph).is_ok());
        assert!(matches!(
            Path::new(vec![1, 3]).unwrap().validate(&graph),
            Err(TopologyError::NotAdjacent { from: 1, to: 3 })
        ));
        assert!(matches!(
            Path::new(vec![4, 5]).unwrap().validate(&graph),
            Err(TopologyError::UnknownQubit { qubit: 5, .. })
        ));
    }

    #[test]
    fn test_pairs_and_endpoints() {
        let path = Path::new(vec![0, 24, 109, 126]).unwrap();
        let pairs: Vec<_> = path.pairs().collect();
        assert_eq!(pairs, vec![(0, 24), (24, 109), (109, 126)]);
        assert_eq!(path.first(), 0);
        assert_eq!(path.last(), 126);
        assert_eq!(path.to_string(), "0 -> 24 -> 109 -> 126");
    }

    #[test]
    fn test_single_qubit_path_has_no_pairs() {
        let path = Path::new(vec![7]).unwrap();
        assert_eq!(path.pairs().count(), 0);
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn test_threshold() {
        let path = Path::new((0..10).collect::<Vec<_>>()).unwrap();
        assert!(path.meets_threshold(10));
        assert!(!path.meets_threshold(50));
    }

    #[test]
    fn test_serde_validates() {
        let path: Path = serde_json::from_str("[3, 4, 5]").unwrap();
        assert_eq!(path.len(), 3);
        assert!(serde_json::from_str::<Path>("[3, 3]").is_err());
    }
}
