//! Error types for stateroom-core.

use thiserror::Error;

/// Result type alias for stateroom-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in stateroom-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Workspace name violates the naming rules.
    #[error("invalid workspace name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl CoreError {
    pub(crate) fn invalid_name(name: &str, reason: &str) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
