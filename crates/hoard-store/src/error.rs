use std::path::PathBuf;
use std::string::FromUtf8Error;

use hoard_types::{ContentId, TypeError};

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A malformed identifier was supplied; nothing was touched.
    #[error(transparent)]
    InvalidIdentifier(#[from] TypeError),

    /// The requested content was never published.
    #[error("content not found: {0}")]
    NotFound(ContentId),

    /// Stored bytes are not valid UTF-8 and were requested as text.
    #[error("content {id} is not valid UTF-8: {source}")]
    Encoding {
        id: ContentId,
        #[source]
        source: FromUtf8Error,
    },

    /// Creating, writing or flushing a staging file failed.
    #[error("staging failed at {}: {source}", path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving staged content into place (or discarding a duplicate) failed.
    #[error("failed to publish {id}: {source}")]
    Publish {
        id: ContentId,
        #[source]
        source: std::io::Error,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// The writer was already closed.
    #[error("staged writer is closed")]
    WriterClosed,

    /// An earlier write or publish on this writer failed.
    #[error("staged writer failed and can no longer publish")]
    WriterFailed,

    /// A thread panicked while holding the in-memory map.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Whether this error reports absent content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Staged writers speak `io::Write`, so their own errors travel inside an
/// `io::Error`; those are unwrapped back to the original variant.
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        let wraps_store_error = err
            .get_ref()
            .is_some_and(|inner| inner.is::<StoreError>());
        if !wraps_store_error {
            return Self::Io(err);
        }
        match err.into_inner().map(|inner| inner.downcast::<StoreError>()) {
            Some(Ok(inner)) => *inner,
            Some(Err(other)) => Self::Io(std::io::Error::other(other)),
            None => Self::WriterFailed,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
