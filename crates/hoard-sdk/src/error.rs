use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    InvalidIdentifier(#[from] hoard_types::TypeError),

    #[error("store error: {0}")]
    Store(#[from] hoard_store::StoreError),

    #[error("pointer error: {0}")]
    Ref(#[from] hoard_refs::RefError),

    #[error("config error: {0}")]
    Config(String),

    #[error("cannot locate a home directory for the default storage root")]
    NoHomeDirectory,

    #[error("storage root {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SdkError {
    /// Whether the failure was a read of absent content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }

    /// Whether a malformed identifier was rejected.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_)
                | Self::Store(hoard_store::StoreError::InvalidIdentifier(_))
                | Self::Ref(hoard_refs::RefError::InvalidIdentifier(_))
        )
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
