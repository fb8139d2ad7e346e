use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::sync::{Arc, PoisonError, RwLock};

use hoard_types::ContentId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ContentReader, ContentStore};
use crate::writer::{Publication, Stage, StagedWriter};

type ObjectMap = HashMap<ContentId, Arc<[u8]>>;

/// In-memory, HashMap-based content store.
///
/// Objects live behind a `RwLock` for safe concurrent access and are lost
/// when the last handle is dropped. Writers buffer in their own memory and
/// only touch the map when they publish. Cloning the store shares the map.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    objects: Arc<RwLock<ObjectMap>>,
}

impl InMemoryContentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|content| content.len() as u64)
            .sum()
    }

    /// Return a sorted list of all stored identifiers.
    pub fn all_ids(&self) -> Vec<ContentId> {
        let map = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<ContentId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl ContentStore for InMemoryContentStore {
    fn open_writer(&self) -> StoreResult<StagedWriter> {
        let stage = MemoryStage {
            buffer: Vec::new(),
            objects: Arc::clone(&self.objects),
        };
        Ok(StagedWriter::new(Box::new(stage)))
    }

    fn open_reader(&self, id: &ContentId) -> StoreResult<ContentReader> {
        let map = self.objects.read().map_err(|_| StoreError::LockPoisoned)?;
        let content = map.get(id).cloned().ok_or(StoreError::NotFound(*id))?;
        Ok(Box::new(Cursor::new(content)))
    }

    fn contains(&self, id: &ContentId) -> StoreResult<bool> {
        let map = self.objects.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("object_count", &self.len())
            .finish()
    }
}

struct MemoryStage {
    buffer: Vec<u8>,
    objects: Arc<RwLock<ObjectMap>>,
}

impl Write for MemoryStage {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stage for MemoryStage {
    fn publish(self: Box<Self>, id: &ContentId) -> StoreResult<Publication> {
        let MemoryStage { buffer, objects } = *self;
        let mut map = objects.write().map_err(|_| StoreError::LockPoisoned)?;
        // First writer wins; later identical content is dropped.
        match map.entry(*id) {
            Entry::Occupied(_) => {
                debug!(%id, "content already present");
                Ok(Publication::Deduplicated)
            }
            Entry::Vacant(slot) => {
                slot.insert(buffer.into());
                Ok(Publication::Stored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance;

    // -----------------------------------------------------------------------
    // Shared contract
    // -----------------------------------------------------------------------

    #[test]
    fn roundtrip() {
        conformance::roundtrip(&InMemoryContentStore::new());
    }

    #[test]
    fn empty_content() {
        conformance::empty_content(&InMemoryContentStore::new());
    }

    #[test]
    fn string_roundtrip() {
        conformance::string_roundtrip(&InMemoryContentStore::new());
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        conformance::invalid_utf8_is_encoding_error(&InMemoryContentStore::new());
    }

    #[test]
    fn missing_content_is_not_found() {
        conformance::missing_content_is_not_found(&InMemoryContentStore::new());
    }

    #[test]
    fn duplicate_write_is_idempotent() {
        conformance::duplicate_write_is_idempotent(&InMemoryContentStore::new());
    }

    #[test]
    fn chunked_write_matches_single_write() {
        conformance::chunked_write_matches_single_write(&InMemoryContentStore::new());
    }

    #[test]
    fn open_writer_is_invisible() {
        conformance::open_writer_is_invisible(&InMemoryContentStore::new());
    }

    #[test]
    fn abandoned_writer_publishes_nothing() {
        conformance::abandoned_writer_publishes_nothing(&InMemoryContentStore::new());
    }

    #[test]
    fn readers_are_independent() {
        conformance::readers_are_independent(&InMemoryContentStore::new());
    }

    // -----------------------------------------------------------------------
    // Bookkeeping
    // -----------------------------------------------------------------------

    #[test]
    fn dedup_keeps_single_entry() {
        let store = InMemoryContentStore::new();
        store.put_bytes(b"identical content").unwrap();
        store.put_bytes(b"identical content").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 17);
    }

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryContentStore::new();
        assert!(store.is_empty());
        store.put_bytes(b"a").unwrap();
        store.put_bytes(b"b").unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryContentStore::new();
        for content in [&b"aaa"[..], &b"bbb"[..], &b"ccc"[..]] {
            store.put_bytes(content).unwrap();
        }
        let ids = store.all_ids();
        assert_eq!(ids.len(), 3);
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn clones_share_objects() {
        let store = InMemoryContentStore::new();
        let other = store.clone();
        let id = store.put_string("shared").unwrap();
        assert_eq!(other.get_string(&id).unwrap(), "shared");
    }

    #[test]
    fn concurrent_identical_writers_store_once() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryContentStore::new());
        let payload = Arc::new(vec![0x5au8; 1 << 20]);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let payload = Arc::clone(&payload);
                thread::spawn(move || store.put_bytes(&payload).unwrap())
            })
            .collect();

        let ids: Vec<ContentId> = handles
            .into_iter()
            .map(|h| h.join().expect("writer thread panicked"))
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryContentStore::new();
        store.put_bytes(b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryContentStore"));
        assert!(debug.contains("object_count"));
    }

    // -----------------------------------------------------------------------
    // Property-based tests
    // -----------------------------------------------------------------------

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::io::Write;

        proptest! {
            #[test]
            fn split_point_does_not_change_identifier(
                data in proptest::collection::vec(any::<u8>(), 0..2048),
                split in 0usize..2048,
            ) {
                let store = InMemoryContentStore::new();
                let split = split.min(data.len());

                let mut writer = store.open_writer().unwrap();
                writer.write_all(&data[..split]).unwrap();
                writer.write_all(&data[split..]).unwrap();
                let id = writer.finish().unwrap();

                prop_assert_eq!(id, hoard_crypto::digest(&data));
                prop_assert_eq!(store.get_bytes(&id).unwrap(), data.clone());
                prop_assert_eq!(store.total_bytes(), data.len() as u64);
            }
        }
    }
}
