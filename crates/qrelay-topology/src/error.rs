//! Error types for the topology crate.

use thiserror::Error;

/// Errors from building coupling graphs or selecting paths.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopologyError {
    /// A qubit index outside the device.
    #[error("Qubit {qubit} is outside the device ({num_qubits} qubits)")]
    UnknownQubit {
        /// The offending index.
        qubit: u32,
        /// Device size.
        num_qubits: u32,
    },

    /// An edge from a qubit to itself.
    #[error("Self-loop on qubit {0} in coupling map")]
    SelfLoop(u32),

    /// Source and target lie in different connected components.
    #[error("No path from qubit {start} to qubit {target}")]
    NoPath {
        /// Path start.
        start: u32,
        /// Requested end.
        target: u32,
    },

    /// No node qualifies as a starting point for a greedy walk.
    #[error("No start candidates with degree <= {max_degree}")]
    NoStartCandidates {
        /// The degree bound that was applied.
        max_degree: usize,
    },

    /// A path with no qubits.
    #[error("Path is empty")]
    EmptyPath,

    /// A path visiting the same qubit twice.
    #[error("Qubit {0} appears more than once in path")]
    RepeatedQubit(u32),

    /// Two consecutive path entries without a coupling between them.
    #[error("Qubits {from} and {to} are not coupled")]
    NotAdjacent {
        /// Earlier entry.
        from: u32,
        /// Later entry.
        to: u32,
    },

    /// A device preset string that could not be parsed.
    #[error("Invalid device preset '{0}' (expected linear:N, ring:N, grid:RxC or heavy-hex:RxL)")]
    InvalidPreset(String),

    /// A device with more qubits than [`MAX_QUBITS`](crate::MAX_QUBITS).
    #[error("Device of {qubits} qubits exceeds the limit of {max}")]
    DeviceTooLarge {
        /// Requested size.
        qubits: u64,
        /// The limit.
        max: u32,
    },

    /// Reading a coupling map file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A coupling map file was not valid JSON.
    #[error("Invalid coupling map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
