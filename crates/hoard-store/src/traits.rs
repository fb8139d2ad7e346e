use std::io::{Read, Write};

use hoard_types::ContentId;

use crate::error::{StoreError, StoreResult};
use crate::writer::StagedWriter;

/// Byte stream over one committed object.
pub type ContentReader = Box<dyn Read + Send>;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Content is only ever stored under the SHA-256 digest of its bytes.
/// - Objects are immutable once published. A second write of identical
///   bytes is a no-op, never an overwrite.
/// - Only fully closed writes are visible; a reader never observes a
///   partially staged object.
/// - All I/O errors are propagated, never silently ignored.
pub trait ContentStore: Send + Sync {
    /// Begin a staged write session.
    fn open_writer(&self) -> StoreResult<StagedWriter>;

    /// Stream the bytes committed under `id`.
    ///
    /// Fails with [`StoreError::NotFound`] if nothing was published there.
    fn open_reader(&self, id: &ContentId) -> StoreResult<ContentReader>;

    /// Check whether content has been published under `id`.
    fn contains(&self, id: &ContentId) -> StoreResult<bool>;

    /// Store a whole byte slice and return its identifier.
    fn put_bytes(&self, content: &[u8]) -> StoreResult<ContentId> {
        let mut writer = self.open_writer()?;
        writer.write_all(content)?;
        writer.finish()
    }

    /// Read the whole object committed under `id`.
    fn get_bytes(&self, id: &ContentId) -> StoreResult<Vec<u8>> {
        let mut reader = self.open_reader(id)?;
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Store UTF-8 text.
    fn put_string(&self, content: &str) -> StoreResult<ContentId> {
        self.put_bytes(content.as_bytes())
    }

    /// Read an object as UTF-8 text.
    ///
    /// Fails with [`StoreError::Encoding`] if the bytes are not valid UTF-8.
    fn get_string(&self, id: &ContentId) -> StoreResult<String> {
        let content = self.get_bytes(id)?;
        String::from_utf8(content).map_err(|source| StoreError::Encoding { id: *id, source })
    }
}
