//! Contract checks every [`PointerStore`] backend must pass.

use hoard_types::{ContentId, PointerId};

use crate::traits::PointerStore;

pub fn pointer(byte: u8) -> PointerId {
    PointerId::from_raw([byte; 32])
}

pub fn content(byte: u8) -> ContentId {
    ContentId::from_raw([byte; 32])
}

pub fn unbound_resolves_to_none(store: &dyn PointerStore) {
    assert_eq!(store.resolve(&pointer(1)).unwrap(), None);
    assert!(!store.is_bound(&pointer(1)).unwrap());
}

pub fn bind_then_resolve(store: &dyn PointerStore) {
    store.bind(&pointer(1), &content(0xaa)).unwrap();
    assert_eq!(store.resolve(&pointer(1)).unwrap(), Some(content(0xaa)));
    assert!(store.is_bound(&pointer(1)).unwrap());
}

pub fn rebind_overwrites(store: &dyn PointerStore) {
    store.bind(&pointer(1), &content(0xaa)).unwrap();
    store.bind(&pointer(1), &content(0xbb)).unwrap();
    assert_eq!(store.resolve(&pointer(1)).unwrap(), Some(content(0xbb)));
}

pub fn unbind_forgets(store: &dyn PointerStore) {
    store.bind(&pointer(1), &content(0xaa)).unwrap();
    store.unbind(&pointer(1)).unwrap();
    assert_eq!(store.resolve(&pointer(1)).unwrap(), None);
}

pub fn unbind_absent_is_noop(store: &dyn PointerStore) {
    store.unbind(&pointer(7)).unwrap();
    store.set(&pointer(7), None).unwrap();
    assert_eq!(store.resolve(&pointer(7)).unwrap(), None);
}

pub fn pointers_are_independent(store: &dyn PointerStore) {
    store.bind(&pointer(1), &content(0xaa)).unwrap();
    store.bind(&pointer(2), &content(0xbb)).unwrap();
    store.unbind(&pointer(1)).unwrap();
    assert_eq!(store.resolve(&pointer(1)).unwrap(), None);
    assert_eq!(store.resolve(&pointer(2)).unwrap(), Some(content(0xbb)));
}

pub fn pointer_may_share_target(store: &dyn PointerStore) {
    store.bind(&pointer(1), &content(0xcc)).unwrap();
    store.bind(&pointer(2), &content(0xcc)).unwrap();
    assert_eq!(
        store.resolve(&pointer(1)).unwrap(),
        store.resolve(&pointer(2)).unwrap()
    );
}
