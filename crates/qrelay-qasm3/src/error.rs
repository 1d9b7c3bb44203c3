//! Error types for QASM output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing QASM.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A circuit name that cannot be used as a file stem.
    #[error("Circuit name {0:?} cannot be used as a file name")]
    InvalidFileName(String),

    /// Writing an output file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for QASM output.
pub type EmitResult<T> = Result<T, EmitError>;
