//! Pointer management for hoard.
//!
//! A pointer is a mutable binding from a caller-chosen [`PointerId`] to a
//! [`ContentId`], the way a git ref names a commit. Bindings carry no
//! history: the last write wins and unbinding forgets the pointer.
//!
//! Binding never checks that the target content exists. A dangling pointer
//! is legal; reading its target is what fails.
//!
//! # Modules
//!
//! - [`error`] -- Error types for pointer operations
//! - [`traits`] -- The [`PointerStore`] trait defining the storage interface
//! - [`memory`] -- In-memory [`InMemoryPointerStore`]
//! - [`fs`] -- One-file-per-pointer [`FsPointerStore`]
//!
//! [`PointerId`]: hoard_types::PointerId
//! [`ContentId`]: hoard_types::ContentId

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

#[cfg(test)]
mod conformance;

pub use error::{RefError, Result};
pub use fs::FsPointerStore;
pub use memory::InMemoryPointerStore;
pub use traits::PointerStore;
