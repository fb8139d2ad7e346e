//! In-memory pointer store for testing and ephemeral use.
//!
//! [`InMemoryPointerStore`] keeps all bindings in a `HashMap` protected by a
//! `RwLock`. Data is lost when the store is dropped.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use hoard_types::{ContentId, PointerId};
use tracing::debug;

use crate::error::{RefError, Result};
use crate::traits::PointerStore;

/// An in-memory implementation of [`PointerStore`].
#[derive(Debug, Default)]
pub struct InMemoryPointerStore {
    pointers: RwLock<HashMap<PointerId, ContentId>>,
}

impl InMemoryPointerStore {
    /// Create a new empty pointer store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound pointers.
    pub fn len(&self) -> usize {
        self.pointers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointerStore for InMemoryPointerStore {
    fn set(&self, pointer: &PointerId, target: Option<&ContentId>) -> Result<()> {
        let mut pointers = self.pointers.write().map_err(|_| RefError::LockPoisoned)?;
        match target {
            Some(target) => {
                pointers.insert(*pointer, *target);
                debug!(%pointer, %target, "pointer bound");
            }
            None => {
                if pointers.remove(pointer).is_some() {
                    debug!(%pointer, "pointer unbound");
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, pointer: &PointerId) -> Result<Option<ContentId>> {
        let pointers = self.pointers.read().map_err(|_| RefError::LockPoisoned)?;
        Ok(pointers.get(pointer).copied())
    }
}
