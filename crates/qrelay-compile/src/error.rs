//! Error types for the compilation crate.

use qrelay_ir::IrError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Coupling graph not set.
    #[error("Coupling graph not set")]
    MissingCouplingMap,

    /// Layout not set.
    #[error("Layout not set")]
    MissingLayout,

    /// A requested layout that is not one-to-one or does not fit the device.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Routing failed between two physical qubits.
    #[error("Routing failed: qubits {qubit1} and {qubit2} are not connected")]
    RoutingFailed {
        /// First physical qubit.
        qubit1: u32,
        /// Second physical qubit.
        qubit2: u32,
    },

    /// A two-qubit gate left on an uncoupled pair.
    #[error("Gate '{gate}' acts on uncoupled physical qubits {qubit1} and {qubit2}")]
    ConnectivityViolation {
        /// Gate name.
        gate: String,
        /// First physical qubit.
        qubit1: u32,
        /// Second physical qubit.
        qubit2: u32,
    },

    /// Circuit is too large for the target.
    #[error("Circuit has {required} qubits but target only has {available}")]
    CircuitTooLarge {
        /// Number of qubits required.
        required: u32,
        /// Number of qubits available.
        available: u32,
    },

    /// Invalid optimization level.
    #[error("Optimization level must be 0-3, got {0}")]
    InvalidOptimizationLevel(u8),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
