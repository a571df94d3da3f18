//! Error types for the Wisp engine.
//!
//! All crates return `WispResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Wisp engine.
#[derive(Debug, Error)]
pub enum WispError {
    /// Strand parameters are missing or out of range.
    #[error("Invalid strand: {0}")]
    InvalidStrand(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A lookup referenced an entity that does not exist.
    #[error("Unknown {kind} id {id}")]
    UnknownId {
        kind: &'static str,
        id: usize,
    },

    /// A simulation invariant was violated (e.g., a pinned mass moved).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, WispError>`.
pub type WispResult<T> = Result<T, WispError>;
