//! Digest and randomness primitives for hoard.
//!
//! Provides the incremental SHA-256 hasher that mints [`ContentId`]s and the
//! random token used to name staging files.
//!
//! All crypto operations wrap established libraries. There is no custom cryptography.
//!
//! [`ContentId`]: hoard_types::ContentId

pub mod hasher;
pub mod token;

pub use hasher::{digest, digest_hex, ContentHasher};
pub use token::random_token;
