//! Contract checks every [`ContentStore`] backend must pass.

use std::io::{Read, Write};

use hoard_types::ContentId;

use crate::error::StoreError;
use crate::traits::ContentStore;

pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

pub fn roundtrip(store: &dyn ContentStore) {
    let content = b"hello world".to_vec();
    let id = store.put_bytes(&content).unwrap();
    assert_eq!(id, hoard_crypto::digest(&content));
    assert!(store.contains(&id).unwrap());
    assert_eq!(store.get_bytes(&id).unwrap(), content);
}

pub fn empty_content(store: &dyn ContentStore) {
    let id = store.put_bytes(b"").unwrap();
    assert_eq!(id.to_hex(), EMPTY_SHA256);
    assert_eq!(store.get_bytes(&id).unwrap(), Vec::<u8>::new());
}

pub fn string_roundtrip(store: &dyn ContentStore) {
    let id = store.put_string("hello").unwrap();
    assert_eq!(store.get_string(&id).unwrap(), "hello");
    assert_eq!(store.get_bytes(&id).unwrap(), b"hello");
}

pub fn invalid_utf8_is_encoding_error(store: &dyn ContentStore) {
    let id = store.put_bytes(&[0xff, 0xfe, 0xfd]).unwrap();
    match store.get_string(&id) {
        Err(StoreError::Encoding { id: failed, .. }) => assert_eq!(failed, id),
        other => panic!("expected encoding error, got {other:?}"),
    }
    // The bytes themselves are still readable.
    assert_eq!(store.get_bytes(&id).unwrap(), vec![0xff, 0xfe, 0xfd]);
}

pub fn missing_content_is_not_found(store: &dyn ContentStore) {
    let id = hoard_crypto::digest(b"never written");
    assert!(!store.contains(&id).unwrap());
    assert!(matches!(store.open_reader(&id), Err(StoreError::NotFound(missing)) if missing == id));
    assert!(store.get_bytes(&id).unwrap_err().is_not_found());
}

pub fn duplicate_write_is_idempotent(store: &dyn ContentStore) {
    let first = store.put_bytes(b"twice").unwrap();
    let second = store.put_bytes(b"twice").unwrap();
    assert_eq!(first, second);
    assert_eq!(store.get_bytes(&first).unwrap(), b"twice");
}

pub fn chunked_write_matches_single_write(store: &dyn ContentStore) {
    let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let single = store.put_bytes(&content).unwrap();

    let mut writer = store.open_writer().unwrap();
    writer.write_all(&[]).unwrap();
    for chunk in content.chunks(333) {
        writer.write_all(chunk).unwrap();
        writer.write_all(&[]).unwrap();
    }
    assert_eq!(writer.bytes_written(), content.len() as u64);
    let chunked = writer.finish().unwrap();

    assert_eq!(single, chunked);
    assert_eq!(store.get_bytes(&chunked).unwrap(), content);
}

pub fn open_writer_is_invisible(store: &dyn ContentStore) {
    let mut writer = store.open_writer().unwrap();
    writer.write_all(b"in flight").unwrap();
    let id = hoard_crypto::digest(b"in flight");
    assert!(!store.contains(&id).unwrap());
    assert_eq!(writer.content_id().unwrap(), id);
    assert!(store.contains(&id).unwrap());
}

pub fn abandoned_writer_publishes_nothing(store: &dyn ContentStore) {
    let mut writer = store.open_writer().unwrap();
    writer.write_all(b"abandoned").unwrap();
    drop(writer);
    assert!(!store.contains(&hoard_crypto::digest(b"abandoned")).unwrap());
}

pub fn readers_are_independent(store: &dyn ContentStore) {
    let id: ContentId = store.put_bytes(b"abcdef").unwrap();
    let mut first = store.open_reader(&id).unwrap();
    let mut second = store.open_reader(&id).unwrap();

    let mut head = [0u8; 3];
    first.read_exact(&mut head).unwrap();
    assert_eq!(&head, b"abc");

    let mut all = Vec::new();
    second.read_to_end(&mut all).unwrap();
    assert_eq!(all, b"abcdef");

    let mut rest = Vec::new();
    first.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, b"def");
}
