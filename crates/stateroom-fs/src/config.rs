//! Store configuration.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration for a [`crate::WorkspaceStore`].
///
/// Holds the single recognized option: the base directory under which all
/// workspace files are resolved. Captured once at construction and immutable
/// thereafter. The directory is not checked for existence or writability
/// here; failures surface lazily on first use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory for all workspace state and lock files.
    pub directory: PathBuf,
}

/// Option-map key for the base directory.
const DIRECTORY_KEY: &str = "directory";

impl StoreConfig {
    /// Create a configuration rooted at the given directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Build a configuration from a host-supplied option map.
    ///
    /// # Errors
    /// Returns `StoreError::MissingDirectory` when the `directory` option is
    /// absent. Unrecognized options are ignored.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self> {
        options
            .get(DIRECTORY_KEY)
            .map(|dir| Self::new(dir))
            .ok_or(StoreError::MissingDirectory)
    }

    /// The configured base directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
