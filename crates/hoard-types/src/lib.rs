//! Foundation types for hoard.
//!
//! Every other hoard crate depends on `hoard-types`. It owns the identifier
//! syntax shared by content and pointer identifiers, the directory fan-out
//! used by the durable backends, the owner-only directory helper those
//! backends build their trees with, and their shared flush policy.
//!
//! # Key Types
//!
//! - [`ContentId`] -- SHA-256 digest of a byte payload, the payload's address
//! - [`PointerId`] -- caller-chosen mutable name with the same syntax
//! - [`ShardPath`] -- nested `2/2/3/57` path derived from an identifier

pub mod content;
pub mod durable;
pub mod error;
pub mod identifier;
pub mod pointer;
pub mod secure;
pub mod shard;

pub use content::ContentId;
pub use durable::{sync_dir, SyncMode};
pub use error::TypeError;
pub use identifier::{is_valid, validate, IDENTIFIER_DIGITS, IDENTIFIER_LENGTH};
pub use pointer::PointerId;
pub use shard::{PreparedPath, ShardPath, LEAF_WIDTH, SHARD_WIDTHS};
