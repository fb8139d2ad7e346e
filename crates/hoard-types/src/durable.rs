//! Flush policy shared by the filesystem backends.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Flush strategy applied to staged files before they are published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    /// `fsync` the staged file before publish and every directory whose
    /// entries the publish changed after it.
    #[default]
    OnCommit,
    /// Rely on OS page-cache buffering (fastest, least durable).
    OsDefault,
}

impl SyncMode {
    /// Whether publishes should `fsync`.
    pub fn syncs(self) -> bool {
        self == Self::OnCommit
    }
}

/// `fsync` a directory so entries added or removed in it reach the disk.
#[cfg(unix)]
pub fn sync_dir(path: &Path) -> io::Result<()> {
    std::fs::File::open(path)?.sync_all()
}

/// Directories cannot be opened for syncing here; entries are flushed by
/// the OS.
#[cfg(not(unix))]
pub fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
