use serde::{Deserialize, Serialize};

use crate::identifier::hex_identifier;

/// Content-addressed identifier for a stored payload.
///
/// A `ContentId` is the SHA-256 digest of the payload's bytes. Identical
/// content always produces the same `ContentId`, which is what lets the
/// content store deduplicate writes. It serializes as its 64-character
/// lowercase hex rendering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId([u8; 32]);

hex_identifier!(ContentId);
