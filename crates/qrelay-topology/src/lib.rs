//! Coupling graphs and relay path selection.
//!
//! A device is described by its [`CouplingGraph`]: physical qubits as nodes,
//! coupled pairs as undirected edges. Experiments need either a chain of
//! coupled qubits to relay a phase along, or a set of anchor qubits. Chains
//! are produced by a [`PathStrategy`]:
//!
//! | Strategy | Finds | Optimal |
//! |----------|-------|---------|
//! | [`ShortestPath`] | BFS path between two named qubits, with optional fallback target | yes |
//! | [`GreedyLongest`] | Long snake path from boundary qubits, first free neighbour | no |
//! | [`LookaheadGreedy`] | Long snake path, fewest-onward-neighbours rule | no |
//! | [`RandomizedGreedy`] | Best of seeded random snake walks | no |
//!
//! # Example
//!
//! ```rust
//! use qrelay_topology::{CouplingGraph, PathStrategy, ShortestPath};
//!
//! let graph = CouplingGraph::from_edges(4, [(0, 1), (1, 0), (1, 2), (2, 3)])?;
//! let path = ShortestPath::new(0, 3).select(&graph)?;
//!
//! assert_eq!(path.as_slice(), &[0, 1, 2, 3]);
//! assert_eq!(path.pairs().count(), 3);
//! # Ok::<(), qrelay_topology::TopologyError>(())
//! ```

pub mod device;
pub mod error;
pub mod graph;
pub mod path;
pub mod strategy;

pub use device::{CouplingMapFile, DevicePreset, MAX_QUBITS};
pub use error::{TopologyError, TopologyResult};
pub use graph::CouplingGraph;
pub use path::Path;
pub use strategy::{GreedyLongest, LookaheadGreedy, PathStrategy, RandomizedGreedy, ShortestPath};
