use std::path::{Path, PathBuf};

use hoard_refs::{FsPointerStore, InMemoryPointerStore, PointerStore};
use hoard_store::{
    ContentReader, ContentStore, FsContentStore, InMemoryContentStore, StagedWriter, SyncMode,
};
use hoard_types::secure::ensure_private_dir;
use hoard_types::{ContentId, PointerId};
use tracing::debug;

use crate::config::HoardConfig;
use crate::error::{SdkError, SdkResult};

/// Directory name of the default root under the home directory.
pub const DEFAULT_ROOT_NAME: &str = ".hoard";
/// Subdirectory holding the sharded content tree.
pub const CONTENT_DIR: &str = "content_db";
/// Subdirectory holding the sharded pointer tree.
pub const POINTER_DIR: &str = "pointer_db";
/// Subdirectory holding in-flight staging files.
pub const STAGING_DIR: &str = "tmp";

/// Content store plus pointer store behind one interface.
///
/// Identifiers come in as strings and are validated before any storage is
/// touched, so a malformed identifier never causes a partial mutation.
pub struct Hoard {
    content: Box<dyn ContentStore>,
    pointers: Box<dyn PointerStore>,
    root: Option<PathBuf>,
}

impl Hoard {
    /// Build the backend pair described by `config`.
    pub fn open(config: &HoardConfig) -> SdkResult<Self> {
        match config.resolved_root()? {
            Some(root) => Self::open_filesystem(&root, config.sync),
            None => Ok(Self::in_memory()),
        }
    }

    /// Durable store rooted at `root`, syncing on commit.
    pub fn open_at(root: impl AsRef<Path>) -> SdkResult<Self> {
        Self::open_filesystem(root.as_ref(), SyncMode::OnCommit)
    }

    /// Durable store at the default root, `~/.hoard`.
    pub fn open_default() -> SdkResult<Self> {
        Self::open(&HoardConfig::default())
    }

    /// Volatile store; nothing outlives the value.
    pub fn in_memory() -> Self {
        Self {
            content: Box::new(InMemoryContentStore::new()),
            pointers: Box::new(InMemoryPointerStore::new()),
            root: None,
        }
    }

    fn open_filesystem(root: &Path, sync: SyncMode) -> SdkResult<Self> {
        let io_err = |source| SdkError::Root {
            path: root.to_path_buf(),
            source,
        };
        ensure_private_dir(root).map_err(io_err)?;
        let root = root.canonicalize().map_err(io_err)?;

        let (content, pointers) = filesystem_stores(&root, sync)?;
        debug!(root = %root.display(), ?sync, "opened filesystem store");

        Ok(Self {
            content: Box::new(content),
            pointers: Box::new(pointers),
            root: Some(root),
        })
    }

    /// Canonical storage root, or `None` for the memory backend.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// The underlying content store, keyed by typed identifiers.
    pub fn content(&self) -> &dyn ContentStore {
        self.content.as_ref()
    }

    /// The underlying pointer store, keyed by typed identifiers.
    pub fn pointers(&self) -> &dyn PointerStore {
        self.pointers.as_ref()
    }

    // ---- Content operations ----

    pub fn open_writer(&self) -> SdkResult<StagedWriter> {
        Ok(self.content.open_writer()?)
    }

    pub fn open_reader(&self, content_id: &str) -> SdkResult<ContentReader> {
        let id: ContentId = content_id.parse()?;
        Ok(self.content.open_reader(&id)?)
    }

    pub fn put_bytes(&self, content: &[u8]) -> SdkResult<ContentId> {
        Ok(self.content.put_bytes(content)?)
    }

    pub fn get_bytes(&self, content_id: &str) -> SdkResult<Vec<u8>> {
        let id: ContentId = content_id.parse()?;
        Ok(self.content.get_bytes(&id)?)
    }

    pub fn put_string(&self, content: &str) -> SdkResult<ContentId> {
        Ok(self.content.put_string(content)?)
    }

    pub fn get_string(&self, content_id: &str) -> SdkResult<String> {
        let id: ContentId = content_id.parse()?;
        Ok(self.content.get_string(&id)?)
    }

    // ---- Pointer operations ----

    /// Bind `pointer_id` to `content_id`, or unbind it when `None`.
    ///
    /// Both identifiers are validated before anything is written. The
    /// target need not exist in the content store.
    pub fn bind(&self, pointer_id: &str, content_id: Option<&str>) -> SdkResult<()> {
        let pointer: PointerId = pointer_id.parse()?;
        let target = content_id.map(str::parse::<ContentId>).transpose()?;
        Ok(self.pointers.set(&pointer, target.as_ref())?)
    }

    pub fn unbind(&self, pointer_id: &str) -> SdkResult<()> {
        self.bind(pointer_id, None)
    }

    /// The content `pointer_id` is bound to, or `None` if unbound.
    pub fn resolve(&self, pointer_id: &str) -> SdkResult<Option<ContentId>> {
        let pointer: PointerId = pointer_id.parse()?;
        Ok(self.pointers.resolve(&pointer)?)
    }
}

/// Both durable stores under `root`, sharing one staging directory and one
/// flush policy.
fn filesystem_stores(root: &Path, sync: SyncMode) -> SdkResult<(FsContentStore, FsPointerStore)> {
    let staging = root.join(STAGING_DIR);
    let content = FsContentStore::open(root.join(CONTENT_DIR), &staging, sync)?;
    let pointers = FsPointerStore::open(root.join(POINTER_DIR), &staging, sync)?;
    Ok((content, pointers))
}

impl std::fmt::Debug for Hoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match self.root {
            Some(_) => "filesystem",
            None => "memory",
        };
        f.debug_struct("Hoard")
            .field("backend", &backend)
            .field("root", &self.root)
            .finish()
    }
}

impl TryFrom<&HoardConfig> for Hoard {
    type Error = SdkError;

    fn try_from(config: &HoardConfig) -> SdkResult<Self> {
        Self::open(config)
    }
}
