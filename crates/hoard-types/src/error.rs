use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The string is not 64 lowercase hexadecimal characters.
    #[error("invalid identifier: {value:?}")]
    InvalidIdentifier { value: String },
}

impl TypeError {
    pub(crate) fn invalid(value: &str) -> Self {
        Self::InvalidIdentifier {
            value: value.to_string(),
        }
    }
}
