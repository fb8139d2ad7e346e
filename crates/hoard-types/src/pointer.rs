use serde::{Deserialize, Serialize};

use crate::identifier::hex_identifier;

/// Caller-chosen name for a mutable binding.
///
/// Pointer identifiers share the content identifier syntax but carry no
/// relation to any digest. A `PointerId` is bound to at most one
/// [`ContentId`](crate::ContentId) at a time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PointerId([u8; 32]);

hex_identifier!(PointerId);
