//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No backend registered under this name.
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// A submission with no circuits.
    #[error("Batch contains no circuits")]
    EmptyBatch,

    /// More circuits than the backend accepts per job.
    #[error("Batch has {submitted} circuits but the backend accepts at most {max}")]
    TooManyCircuits {
        /// Circuits submitted.
        submitted: usize,
        /// Backend limit.
        max: usize,
    },

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit '{circuit}' needs {required} qubits but the device has {available}")]
    CircuitTooLarge {
        /// Circuit name.
        circuit: String,
        /// Qubits the circuit spans.
        required: u32,
        /// Qubits on the device.
        available: u32,
    },

    /// A two-qubit gate on a pair the device does not couple.
    #[error("Circuit '{circuit}' has a two-qubit gate on uncoupled qubits {qubit1} and {qubit2}")]
    UncoupledGate {
        /// Circuit name.
        circuit: String,
        /// First physical qubit.
        qubit1: u32,
        /// Second physical qubit.
        qubit2: u32,
    },

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Ledger file I/O failed.
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
