//! Error types for pointer operations.

use hoard_types::{PointerId, TypeError};
use thiserror::Error;

/// Errors that can occur during pointer operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// A malformed pointer or content identifier was supplied.
    #[error(transparent)]
    InvalidIdentifier(#[from] TypeError),

    /// The stored binding does not hold a valid content identifier.
    #[error("corrupt pointer {pointer}: {reason}")]
    CorruptPointer { pointer: PointerId, reason: String },

    /// Removing a binding failed.
    #[error("could not remove pointer {pointer}: {source}")]
    Remove {
        pointer: PointerId,
        #[source]
        source: std::io::Error,
    },

    /// A thread panicked while holding the in-memory map.
    #[error("pointer lock poisoned")]
    LockPoisoned,

    /// I/O error during file-based pointer operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for pointer operations.
pub type Result<T> = std::result::Result<T, RefError>;
