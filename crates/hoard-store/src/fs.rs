//! Durable, directory-tree content store.
//!
//! Layout under the content root is `<2>/<2>/<3>/<57>` per
//! [`ShardPath`](hoard_types::ShardPath). A write streams into a private
//! file in the staging directory; on close the digest picks the destination
//! and the staged file is renamed there only if nothing is present yet. The
//! rename is the commit point: a crash before it leaves at most an orphaned
//! staging file, a crash after it is a completed commit.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hoard_crypto::random_token;
use hoard_types::secure::ensure_private_dir;
use hoard_types::{ContentId, SyncMode};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ContentReader, ContentStore};
use crate::writer::{Publication, Stage, StagedWriter};

/// Content store backed by a sharded directory tree.
///
/// Many processes may share one tree; publication relies on an atomic
/// no-clobber rename rather than locks.
#[derive(Clone, Debug)]
pub struct FsContentStore {
    content_dir: PathBuf,
    staging_dir: PathBuf,
    sync: SyncMode,
}

impl FsContentStore {
    /// Open a store over `content_dir`, staging writes in `staging_dir`.
    ///
    /// Both directories are created owner-only if missing; their parents
    /// must exist. They should live on the same filesystem so publication
    /// stays a rename.
    pub fn open(
        content_dir: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        sync: SyncMode,
    ) -> StoreResult<Self> {
        let content_dir = content_dir.into();
        let staging_dir = staging_dir.into();
        ensure_private_dir(&content_dir)?;
        ensure_private_dir(&staging_dir)?;
        Ok(Self {
            content_dir,
            staging_dir,
            sync,
        })
    }

    /// Root of the sharded object tree.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Directory holding in-flight staging files.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Flush policy applied on publish.
    pub fn sync(&self) -> SyncMode {
        self.sync
    }

    /// Where the object for `id` lives (or would live).
    pub fn object_path(&self, id: &ContentId) -> PathBuf {
        id.shard_path().resolve(&self.content_dir)
    }
}

impl ContentStore for FsContentStore {
    fn open_writer(&self) -> StoreResult<StagedWriter> {
        let token = random_token();
        let file = tempfile::Builder::new()
            .prefix(&token)
            .rand_bytes(0)
            .tempfile_in(&self.staging_dir)
            .map_err(|source| StoreError::Staging {
                path: self.staging_dir.join(&token),
                source,
            })?;
        let stage = FsStage {
            file: BufWriter::new(file),
            content_dir: self.content_dir.clone(),
            sync: self.sync,
        };
        Ok(StagedWriter::new(Box::new(stage)))
    }

    fn open_reader(&self, id: &ContentId) -> StoreResult<ContentReader> {
        match File::open(self.object_path(id)) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(*id)),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, id: &ContentId) -> StoreResult<bool> {
        Ok(self.object_path(id).try_exists()?)
    }
}

struct FsStage {
    file: BufWriter<NamedTempFile>,
    content_dir: PathBuf,
    sync: SyncMode,
}

impl FsStage {
    // Keeps the kind so `write_all` still retries on `Interrupted`.
    fn staging_error(&self, source: io::Error) -> io::Error {
        let kind = source.kind();
        let path = self.file.get_ref().path().to_path_buf();
        io::Error::new(kind, StoreError::Staging { path, source })
    }
}

impl Write for FsStage {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf).map_err(|e| self.staging_error(e))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush().map_err(|e| self.staging_error(e))
    }
}

impl Stage for FsStage {
    fn publish(self: Box<Self>, id: &ContentId) -> StoreResult<Publication> {
        let FsStage {
            file,
            content_dir,
            sync,
        } = *self;
        let staged_path = file.get_ref().path().to_path_buf();
        let staging = |source| StoreError::Staging {
            path: staged_path.clone(),
            source,
        };
        let publish = |source| StoreError::Publish { id: *id, source };

        let temp = file.into_inner().map_err(|e| staging(e.into_error()))?;
        if sync.syncs() {
            temp.as_file().sync_all().map_err(staging)?;
        }

        let prepared = id.shard_path().create_dirs(&content_dir).map_err(publish)?;
        let dest = &prepared.leaf;
        let publication = if dest.try_exists().map_err(publish)? {
            temp.close().map_err(publish)?;
            debug!(%id, "content already present; discarded staged copy");
            Publication::Deduplicated
        } else {
            make_read_only(temp.as_file()).map_err(publish)?;
            match temp.persist_noclobber(dest) {
                Ok(_) => {
                    debug!(%id, path = %dest.display(), "published content");
                    Publication::Stored
                }
                // Lost the race to a concurrent writer of the same content.
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    e.file.close().map_err(publish)?;
                    debug!(%id, "concurrent writer published first; discarded staged copy");
                    Publication::Deduplicated
                }
                Err(e) => return Err(publish(e.error)),
            }
        };
        // Shard levels this call created must reach the disk too, whichever
        // writer placed the leaf.
        if sync.syncs() {
            prepared.sync().map_err(publish)?;
        }
        Ok(publication)
    }
}

fn make_read_only(file: &File) -> io::Result<()> {
    let mut perms = file.metadata()?.permissions();
    perms.set_readonly(true);
    file.set_permissions(perms)
}
