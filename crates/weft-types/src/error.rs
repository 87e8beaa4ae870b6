//! Error types for the weft engine.
//!
//! All library crates return `WeftResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the weft engine.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A constraint or neighbor entry references data that does not exist.
    ///
    /// Indicates a bug in topology extraction or a constraint set applied
    /// to the wrong buffer. Not recoverable for the affected mesh.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, WeftError>`.
pub type WeftResult<T> = Result<T, WeftError>;
