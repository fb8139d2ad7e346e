//! Content-addressed object storage for hoard.
//!
//! Every payload is stored as an immutable object identified by the SHA-256
//! digest of its bytes, analogous to git's `.git/objects/` directory.
//! Writes go through a [`StagedWriter`] that hashes while it stages and
//! publishes exactly once on close.
//!
//! # Storage Backends
//!
//! All backends implement the [`ContentStore`] trait:
//!
//! - [`FsContentStore`] -- sharded directory tree with atomic rename publish
//! - [`InMemoryContentStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once published (content-addressing guarantees this).
//! 2. Stage-then-publish: bytes are hashed and staged privately, then made
//!    visible in one step under their digest.
//! 3. At most one write wins per digest; later identical writes are discarded.
//! 4. Writes to different identifiers never coordinate.
//! 5. The store never interprets object contents.
//! 6. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;
pub mod writer;

#[cfg(test)]
mod conformance;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsContentStore;
pub use hoard_types::SyncMode;
pub use memory::InMemoryContentStore;
pub use traits::{ContentReader, ContentStore};
pub use writer::{Publication, Stage, StagedWriter};
