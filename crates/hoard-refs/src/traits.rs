//! The [`PointerStore`] trait defining the pointer storage interface.

use hoard_types::{ContentId, PointerId};

use crate::error::Result;

/// Storage backend for pointers.
///
/// Implementations must be thread-safe (`Send + Sync`). A binding is
/// replaced as a whole, so a concurrent reader sees either the old target
/// or the new one. No ordering is promised between concurrent writers of
/// the same pointer.
pub trait PointerStore: Send + Sync {
    /// Bind `pointer` to `target`, or remove the binding when `target` is
    /// `None`. Removing an absent binding is a no-op.
    fn set(&self, pointer: &PointerId, target: Option<&ContentId>) -> Result<()>;

    /// The content `pointer` is bound to, or `None` if unbound.
    fn resolve(&self, pointer: &PointerId) -> Result<Option<ContentId>>;

    /// Record or overwrite the binding for `pointer`.
    fn bind(&self, pointer: &PointerId, target: &ContentId) -> Result<()> {
        self.set(pointer, Some(target))
    }

    /// Remove any binding for `pointer`.
    fn unbind(&self, pointer: &PointerId) -> Result<()> {
        self.set(pointer, None)
    }

    /// Whether `pointer` is currently bound.
    fn is_bound(&self, pointer: &PointerId) -> Result<bool> {
        Ok(self.resolve(pointer)?.is_some())
    }
}
