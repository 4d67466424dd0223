//! Error types for the filesystem backend.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration did not supply the base directory.
    #[error("missing directory configuration")]
    MissingDirectory,

    /// State file not found where the operation requires one.
    #[error("no state for workspace '{0}'")]
    StateNotFound(String),

    /// A lock is already held on the workspace.
    #[error("lock already exists for workspace '{0}'")]
    LockHeld(String),

    /// No lock is held on the workspace.
    #[error("lock does not exist for workspace '{0}'")]
    LockNotFound(String),

    /// The presented id does not match the held lock.
    #[error("lock ID does not match for workspace '{workspace}'")]
    LockMismatch { workspace: String },

    /// Core domain error (invalid workspace name).
    #[error(transparent)]
    Core(#[from] stateroom_core::CoreError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed persisted lock metadata.
    #[error("malformed lock metadata: {0}")]
    Format(#[from] serde_json::Error),
}
