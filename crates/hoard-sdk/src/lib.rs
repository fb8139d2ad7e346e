//! High-level SDK for hoard.
//!
//! [`Hoard`] joins a content store and a pointer store behind one facade
//! that takes identifiers as strings and validates them before any I/O.
//! The backend pair (filesystem or memory) is picked at construction from a
//! [`HoardConfig`].

pub mod config;
pub mod error;
pub mod hoard;

pub use config::{Backend, HoardConfig};
pub use error::{SdkError, SdkResult};
pub use hoard::{Hoard, CONTENT_DIR, DEFAULT_ROOT_NAME, POINTER_DIR, STAGING_DIR};

// Re-export key types
pub use hoard_refs::PointerStore;
pub use hoard_store::{ContentReader, ContentStore, StagedWriter, SyncMode};
pub use hoard_types::{ContentId, PointerId};
