//! Identifier syntax shared by content and pointer identifiers.
//!
//! An identifier is exactly [`IDENTIFIER_LENGTH`] characters drawn from
//! [`IDENTIFIER_DIGITS`]. Uppercase digits are rejected, never folded.

use crate::error::TypeError;

/// Length of an identifier in characters (256 bits, 4 bits per digit).
pub const IDENTIFIER_LENGTH: usize = 256 / 4;

/// The only characters an identifier may contain.
pub const IDENTIFIER_DIGITS: &str = "0123456789abcdef";

/// Returns `true` iff `identifier` is 64 lowercase hex characters.
///
/// Absent values are handled by the caller: `opt.is_some_and(is_valid)`.
pub fn is_valid(identifier: &str) -> bool {
    identifier.len() == IDENTIFIER_LENGTH
        && identifier
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Fails with [`TypeError::InvalidIdentifier`] unless [`is_valid`] holds.
pub fn validate(identifier: &str) -> Result<(), TypeError> {
    if is_valid(identifier) {
        Ok(())
    } else {
        Err(TypeError::invalid(identifier))
    }
}

/// Validate and decode an identifier into its 32 raw bytes.
pub(crate) fn decode(identifier: &str) -> Result<[u8; 32], TypeError> {
    validate(identifier)?;
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(identifier, &mut bytes).map_err(|_| TypeError::invalid(identifier))?;
    Ok(bytes)
}

/// Shared surface of the 32-byte hex identifier newtypes.
///
/// The wrapped type must be a tuple struct over `[u8; 32]`.
macro_rules! hex_identifier {
    ($name:ident) => {
        impl $name {
            /// Wrap 32 raw bytes.
            pub const fn from_raw(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Parse from 64 lowercase hex characters.
            pub fn from_hex(s: &str) -> Result<Self, $crate::error::TypeError> {
                $crate::identifier::decode(s).map(Self)
            }

            /// The raw 32 bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Full lowercase hex rendering (64 characters).
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Short hex representation (first 8 characters).
            pub fn short_hex(&self) -> String {
                hex::encode(&self.0[..4])
            }

            /// The fan-out path this identifier is stored under.
            pub fn shard_path(&self) -> $crate::shard::ShardPath {
                $crate::shard::ShardPath::from_valid(self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.short_hex())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::TypeError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::from_hex(&s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = $crate::error::TypeError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::from_hex(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_hex()
            }
        }
    };
}

pub(crate) use hex_identifier;
