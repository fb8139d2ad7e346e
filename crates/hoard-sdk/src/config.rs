use std::path::{Path, PathBuf};

use hoard_store::SyncMode;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};
use crate::hoard::DEFAULT_ROOT_NAME;

/// Which backend pair a [`Hoard`](crate::Hoard) is built on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Backend {
    /// Durable directory tree. `root: None` means `~/.hoard`.
    Filesystem {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        root: Option<PathBuf>,
    },
    /// Volatile, process-local maps.
    Memory,
}

impl Default for Backend {
    fn default() -> Self {
        Self::Filesystem { root: None }
    }
}

/// Store configuration.
///
/// ```toml
/// sync = "os-default"
///
/// [backend]
/// kind = "filesystem"
/// root = "/var/lib/hoard"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoardConfig {
    /// Only meaningful for the filesystem backend.
    pub sync: SyncMode,
    pub backend: Backend,
}

impl HoardConfig {
    /// Filesystem backend rooted at `root`.
    pub fn filesystem(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Filesystem {
                root: Some(root.into()),
            },
            ..Default::default()
        }
    }

    /// Volatile in-memory backend.
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            ..Default::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// The storage root for the filesystem backend, filling in the default.
    ///
    /// Returns `Ok(None)` for the memory backend.
    pub fn resolved_root(&self) -> SdkResult<Option<PathBuf>> {
        match &self.backend {
            Backend::Filesystem { root: Some(root) } => Ok(Some(root.clone())),
            Backend::Filesystem { root: None } => default_root().map(Some),
            Backend::Memory => Ok(None),
        }
    }
}

impl From<Backend> for HoardConfig {
    fn from(backend: Backend) -> Self {
        Self {
            backend,
            ..Default::default()
        }
    }
}

/// `~/.hoard`.
pub fn default_root() -> SdkResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_ROOT_NAME))
        .ok_or(SdkError::NoHomeDirectory)
}
