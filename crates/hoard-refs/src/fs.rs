//! One-file-per-pointer store.
//!
//! Each binding is a small file at the pointer's sharded path holding the
//! target's 64 hex characters, owner read/write only. Updates are written to
//! a private staging file and renamed over the old binding. Under
//! [`SyncMode::OnCommit`] the staged file is synced before the rename and
//! every directory the rename or an unbind changed is synced after it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hoard_crypto::random_token;
use hoard_types::secure::ensure_private_dir;
use hoard_types::{sync_dir, ContentId, PointerId, SyncMode};
use tracing::debug;

use crate::error::{RefError, Result};
use crate::traits::PointerStore;

/// Filesystem implementation of [`PointerStore`].
#[derive(Clone, Debug)]
pub struct FsPointerStore {
    pointer_dir: PathBuf,
    staging_dir: PathBuf,
    sync: SyncMode,
}

impl FsPointerStore {
    /// Open a store over `pointer_dir`, staging updates in `staging_dir`.
    ///
    /// Both directories are created owner-only if missing.
    pub fn open(
        pointer_dir: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        sync: SyncMode,
    ) -> Result<Self> {
        let pointer_dir = pointer_dir.into();
        let staging_dir = staging_dir.into();
        ensure_private_dir(&pointer_dir)?;
        ensure_private_dir(&staging_dir)?;
        Ok(Self {
            pointer_dir,
            staging_dir,
            sync,
        })
    }

    /// Root of the sharded pointer tree.
    pub fn pointer_dir(&self) -> &Path {
        &self.pointer_dir
    }

    /// Flush policy applied to binding updates.
    pub fn sync(&self) -> SyncMode {
        self.sync
    }

    /// Where the binding for `pointer` lives (or would live).
    pub fn pointer_path(&self, pointer: &PointerId) -> PathBuf {
        pointer.shard_path().resolve(&self.pointer_dir)
    }

    fn write_binding(&self, pointer: &PointerId, target: &ContentId) -> Result<()> {
        let prepared = pointer.shard_path().create_dirs(&self.pointer_dir)?;
        let mut file = tempfile::Builder::new()
            .prefix(&random_token())
            .rand_bytes(0)
            .tempfile_in(&self.staging_dir)?;
        file.write_all(target.to_hex().as_bytes())?;
        if self.sync.syncs() {
            file.as_file().sync_all()?;
        }
        file.persist(&prepared.leaf).map_err(|e| RefError::Io(e.error))?;
        if self.sync.syncs() {
            prepared.sync()?;
        }
        debug!(%pointer, %target, "pointer bound");
        Ok(())
    }

    fn remove_binding(&self, pointer: &PointerId) -> Result<()> {
        let path = self.pointer_path(pointer);
        match fs::remove_file(&path) {
            Ok(()) => {
                if let Some(parent) = path.parent().filter(|_| self.sync.syncs()) {
                    sync_dir(parent)?;
                }
                debug!(%pointer, "pointer unbound");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RefError::Remove {
                pointer: *pointer,
                source,
            }),
        }
    }
}

impl PointerStore for FsPointerStore {
    fn set(&self, pointer: &PointerId, target: Option<&ContentId>) -> Result<()> {
        match target {
            Some(target) => self.write_binding(pointer, target),
            None => self.remove_binding(pointer),
        }
    }

    fn resolve(&self, pointer: &PointerId) -> Result<Option<ContentId>> {
        let text = match fs::read_to_string(self.pointer_path(pointer)) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(RefError::CorruptPointer {
                    pointer: *pointer,
                    reason: "binding is not UTF-8".into(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let target = ContentId::from_hex(text.trim_end()).map_err(|e| RefError::CorruptPointer {
            pointer: *pointer,
            reason: e.to_string(),
        })?;
        Ok(Some(target))
    }
}
