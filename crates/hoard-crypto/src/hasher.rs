use sha2::{Digest, Sha256};

use hoard_types::ContentId;

/// Incremental SHA-256 hasher producing a [`ContentId`].
///
/// Chunks may be fed in any sizes, including empty ones; the result always
/// equals the single-shot digest of their concatenation.
#[derive(Clone, Default)]
pub struct ContentHasher {
    inner: Sha256,
    len: u64,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed another chunk.
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
        self.len += chunk.len() as u64;
    }

    /// Total number of bytes fed so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consume the hasher and return the identifier of everything fed.
    pub fn finalize(self) -> ContentId {
        ContentId::from_raw(self.inner.finalize().into())
    }

    /// Verify that `data` hashes to `expected`.
    pub fn verify(data: &[u8], expected: &ContentId) -> bool {
        digest(data) == *expected
    }
}

impl std::fmt::Debug for ContentHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHasher").field("len", &self.len).finish()
    }
}

/// Single-shot SHA-256 over `data`.
pub fn digest(data: &[u8]) -> ContentId {
    ContentId::from_raw(Sha256::digest(data).into())
}

/// SHA-256 over `data` rendered as 64 lowercase hex characters.
pub fn digest_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
