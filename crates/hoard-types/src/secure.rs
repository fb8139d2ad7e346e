//! Owner-only directory creation.
//!
//! Storage roots and every directory beneath them are created readable,
//! writable and searchable by the owner only (mode `0700` on Unix).

use std::fs;
use std::io;
use std::path::Path;

/// Permission bits applied to directories created by hoard.
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Create a single directory with owner-only permissions.
///
/// Fails if the directory already exists or its parent is missing.
pub fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(PRIVATE_DIR_MODE);
    }
    builder.create(path)?;
    restrict_to_owner(path)
}

/// Create `path` owner-only unless a directory is already there.
///
/// Returns `true` if this call created it.
pub fn ensure_private_dir(path: &Path) -> io::Result<bool> {
    match create_private_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(e),
    }
}

// The process umask may have narrowed the mode further; reset it exactly.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_DIR_MODE))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> io::Result<()> {
    Ok(())
}
