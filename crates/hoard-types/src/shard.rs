//! Directory fan-out for identifier-keyed trees.
//!
//! An identifier is split into runs of 2, 2, 3 and 57 characters. The first
//! three runs name nested directories and the last names the leaf file, so
//! the top two levels hold at most 256 entries each and the third at most
//! 4096 before reaching leaf granularity.

use std::io;
use std::path::{Path, PathBuf};

use crate::durable::sync_dir;
use crate::error::TypeError;
use crate::identifier::{validate, IDENTIFIER_LENGTH};
use crate::secure::ensure_private_dir;

/// Widths of the three directory segments, outermost first.
pub const SHARD_WIDTHS: [usize; 3] = [2, 2, 3];

/// Width of the leaf file name.
pub const LEAF_WIDTH: usize = IDENTIFIER_LENGTH - 2 - 2 - 3;

/// The sharded location of one identifier under some root.
///
/// Building a `ShardPath` never touches the filesystem. Only
/// [`ShardPath::create_dirs`] does, and only writers call it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShardPath {
    hex: String,
}

impl ShardPath {
    /// Shard an identifier string, validating it first.
    pub fn parse(identifier: &str) -> Result<Self, TypeError> {
        validate(identifier)?;
        Ok(Self::from_valid(identifier.to_string()))
    }

    /// Caller guarantees `hex` already passed validation.
    pub(crate) fn from_valid(hex: String) -> Self {
        debug_assert_eq!(hex.len(), IDENTIFIER_LENGTH);
        Self { hex }
    }

    /// The three directory segments.
    pub fn segments(&self) -> [&str; 3] {
        let [a, b, c, _] = self.components();
        [a, b, c]
    }

    /// The leaf file name.
    pub fn leaf(&self) -> &str {
        &self.hex[IDENTIFIER_LENGTH - LEAF_WIDTH..]
    }

    /// All four runs in order; their concatenation is the identifier.
    pub fn components(&self) -> [&str; 4] {
        let (first, rest) = self.hex.split_at(SHARD_WIDTHS[0]);
        let (second, rest) = rest.split_at(SHARD_WIDTHS[1]);
        let (third, leaf) = rest.split_at(SHARD_WIDTHS[2]);
        [first, second, third, leaf]
    }

    /// Directory that holds the leaf, relative to `root`.
    pub fn parent_under(&self, root: &Path) -> PathBuf {
        self.segments()
            .iter()
            .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
    }

    /// Full leaf path under `root`. Pure.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.parent_under(root).join(self.leaf())
    }

    /// Like [`resolve`](Self::resolve), creating missing segment directories
    /// owner-only on the way down.
    ///
    /// A segment created concurrently by another writer counts as present
    /// and is not reported as created.
    pub fn create_dirs(&self, root: &Path) -> io::Result<PreparedPath> {
        let mut dir = root.to_path_buf();
        let mut created = Vec::new();
        for segment in self.segments() {
            dir.push(segment);
            if ensure_private_dir(&dir)? {
                created.push(dir.clone());
            }
        }
        Ok(PreparedPath {
            leaf: dir.join(self.leaf()),
            created,
        })
    }
}

/// A leaf location whose segment directories exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedPath {
    /// Full leaf path under the root.
    pub leaf: PathBuf,
    /// Segment directories created on the way down, outermost first.
    pub created: Vec<PathBuf>,
}

impl PreparedPath {
    /// Directories whose entries change once the leaf is placed, innermost
    /// first: the leaf's own directory, then the parent of every created
    /// segment.
    pub fn touched_dirs(&self) -> Vec<&Path> {
        self.leaf
            .parent()
            .into_iter()
            .chain(self.created.iter().rev().filter_map(|dir| dir.parent()))
            .collect()
    }

    /// `fsync` every directory in [`touched_dirs`](Self::touched_dirs).
    pub fn sync(&self) -> io::Result<()> {
        self.touched_dirs().into_iter().try_for_each(sync_dir)
    }
}

impl AsRef<str> for ShardPath {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}
