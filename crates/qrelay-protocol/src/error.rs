//! Error types for experiment assembly.

use qrelay_ir::IrError;
use qrelay_topology::TopologyError;
use thiserror::Error;

/// Errors raised while assembling experiment circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssemblyError {
    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Path selection or validation failed.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// A configured qubit does not fit in the register.
    #[error("Qubit {qubit} does not fit in a register of {register_size} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: u32,
        /// Register width.
        register_size: u32,
    },

    /// Two roles were given the same qubit.
    #[error("{role} qubit {qubit} is also used as {other}")]
    QubitConflict {
        /// First role.
        role: &'static str,
        /// Second role.
        other: &'static str,
        /// The shared qubit.
        qubit: u32,
    },

    /// A batch with no arms.
    #[error("Experiment '{0}' has no arms")]
    NoArms(String),

    /// A skeleton with no anchors.
    #[error("Skeleton experiment needs at least one anchor")]
    NoAnchors,

    /// A configuration value that is missing or inconsistent.
    #[error("Invalid experiment configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid YAML.
    #[error("Invalid experiment YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;
