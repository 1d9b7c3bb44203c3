use tracing::{debug, warn};

use super::PathStrategy;
use crate::error::{TopologyError, TopologyResult};
use crate::graph::CouplingGraph;
use crate::path::Path;

/// Breadth-first shortest path between two named qubits.
///
/// When the target is unreachable and a fallback target is configured, the
/// search is retried towards the fallback. Without a fallback the
/// [`TopologyError::NoPath`] error is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestPath {
    /// Path start.
    pub source: u32,
    /// Preferred end.
    pub target: u32,
    /// End to use when `target` is unreachable.
    pub fallback: Option<u32>,
}

impl ShortestPath {
    /// Shortest path from `source` to `target`, no fallback.
    pub fn new(source: u32, target: u32) -> Self {
        Self {
            source,
            target,
            fallback: None,
        }
    }

    /// Retry towards `fallback` if `target` is unreachable.
    #[must_use]
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl PathStrategy for ShortestPath {
    fn name(&self) -> &str {
        "shortest"
    }

    fn select(&self, graph: &CouplingGraph) -> TopologyResult<Path> {
        graph.check_qubit(self.source)?;
        graph.check_qubit(self.target)?;

        if let Some(qubits) = graph.shortest_path(self.source, self.target) {
            debug!(
                "Shortest path {} -> {}: {} qubits",
                self.source,
                self.target,
                qubits.len()
            );
            return Path::new(qubits);
        }

        let Some(fallback) = self.fallback else {
            return Err(TopologyError::NoPath {
                start: self.source,
                target: self.target,
            });
        };
        graph.check_qubit(fallback)?;
        warn!(
            "No path from {} to {}, falling back to target {}",
            self.source, self.target, fallback
        );
        graph
            .shortest_path(self.source, fallback)
            .ok_or(TopologyError::NoPath {
                start: self.source,
                target: fallback,
            })
            .and_then(Path::new)
    }
}
