//! Staged write sessions.
//!
//! A [`StagedWriter`] accepts bytes while open, hashing each chunk as it
//! goes, and publishes the staged content under its digest exactly once
//! when closed. Backends supply the staging half through [`Stage`].

use std::io::{self, Write};

use hoard_crypto::ContentHasher;
use hoard_types::ContentId;
use tracing::{debug, trace};

use crate::error::{StoreError, StoreResult};

/// Outcome of publishing a staged write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Publication {
    /// The content was new and is now visible under its identifier.
    Stored,
    /// Identical content was already present; the staged copy was discarded.
    Deduplicated,
}

/// Backend-specific staging sink.
///
/// Bytes arrive through [`Write`]. `publish` is called at most once, with
/// the digest of exactly the bytes written, and must make the content
/// visible only if no object already exists under `id`. Dropping a stage
/// without publishing releases whatever it staged.
pub trait Stage: Write + Send {
    fn publish(self: Box<Self>, id: &ContentId) -> StoreResult<Publication>;
}

enum WriterState {
    Open(Box<dyn Stage>),
    Closed(ContentId),
    Failed,
}

/// Write-once, hash-accumulating handle for one piece of content.
///
/// States are `Open → Closed`. Writes after close fail. [`close`] is
/// idempotent and [`content_id`] closes implicitly. A handle dropped while
/// open publishes nothing.
///
/// [`close`]: StagedWriter::close
/// [`content_id`]: StagedWriter::content_id
pub struct StagedWriter {
    hasher: ContentHasher,
    written: u64,
    state: WriterState,
}

impl StagedWriter {
    /// Begin a session over a backend stage.
    pub fn new(stage: Box<dyn Stage>) -> Self {
        Self {
            hasher: ContentHasher::new(),
            written: 0,
            state: WriterState::Open(stage),
        }
    }

    /// Whether the writer still accepts bytes.
    pub fn is_open(&self) -> bool {
        matches!(self.state, WriterState::Open(_))
    }

    /// Bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Finalize the digest and publish. A second call is a no-op.
    ///
    /// If publishing fails the writer is left failed and later calls
    /// return [`StoreError::WriterFailed`].
    pub fn close(&mut self) -> StoreResult<()> {
        match std::mem::replace(&mut self.state, WriterState::Failed) {
            WriterState::Open(stage) => {
                let id = std::mem::take(&mut self.hasher).finalize();
                let publication = stage.publish(&id)?;
                debug!(%id, bytes = self.written, ?publication, "staged write closed");
                self.state = WriterState::Closed(id);
                Ok(())
            }
            WriterState::Closed(id) => {
                self.state = WriterState::Closed(id);
                Ok(())
            }
            WriterState::Failed => Err(StoreError::WriterFailed),
        }
    }

    /// The published identifier, closing first if still open.
    pub fn content_id(&mut self) -> StoreResult<ContentId> {
        self.close()?;
        match self.state {
            WriterState::Closed(id) => Ok(id),
            _ => Err(StoreError::WriterFailed),
        }
    }

    /// Close by value and return the identifier.
    pub fn finish(mut self) -> StoreResult<ContentId> {
        self.content_id()
    }
}

impl Write for StagedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let stage = match &mut self.state {
            WriterState::Open(stage) => stage,
            WriterState::Closed(_) => return Err(io::Error::other(StoreError::WriterClosed)),
            WriterState::Failed => return Err(io::Error::other(StoreError::WriterFailed)),
        };
        // A partial sink write would leave digest and bytes out of step.
        if let Err(e) = stage.write_all(buf) {
            self.state = WriterState::Failed;
            return Err(e);
        }
        self.hasher.update(buf);
        self.written += buf.len() as u64;
        trace!(chunk = buf.len(), total = self.written, "staged chunk");
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            WriterState::Open(stage) => stage.flush(),
            _ => Ok(()),
        }
    }
}

impl Drop for StagedWriter {
    fn drop(&mut self) {
        if self.is_open() {
            debug!(bytes = self.written, "staged write abandoned");
        }
    }
}

impl std::fmt::Debug for StagedWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            WriterState::Open(_) => "open".to_string(),
            WriterState::Closed(id) => format!("closed({})", id.short_hex()),
            WriterState::Failed => "failed".to_string(),
        };
        f.debug_struct("StagedWriter")
            .field("state", &state)
            .field("bytes_written", &self.written)
            .finish()
    }
}
