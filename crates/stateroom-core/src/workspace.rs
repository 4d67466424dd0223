//! Workspace naming rules and storage-layout suffixes.

use crate::error::{CoreError, Result};

/// Suffix of the file holding a workspace's state payload.
pub const STATE_SUFFIX: &str = ".state";
/// Suffix of the file marking a workspace as locked.
pub const LOCK_SUFFIX: &str = ".lock";

/// Validate a workspace name before it is turned into file paths.
///
/// Names map directly onto file names in a flat directory, so they must be
/// non-empty, free of path separators and traversal sequences, and must not
/// end in one of the reserved suffixes (a workspace literally named
/// `foo.state` would collide with workspace `foo`'s state file).
///
/// # Errors
/// Returns `CoreError::InvalidName` describing the first rule violated.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CoreError::invalid_name(name, "name is empty"));
    }

    if name == "." || name == ".." {
        return Err(CoreError::invalid_name(name, "name is a path traversal"));
    }

    if name.contains(['/', '\\', '\0']) {
        return Err(CoreError::invalid_name(
            name,
            "name contains a path separator or NUL",
        ));
    }

    for suffix in [STATE_SUFFIX, LOCK_SUFFIX] {
        if name.ends_with(suffix) {
            return Err(CoreError::invalid_name(
                name,
                &format!("name ends with reserved suffix '{suffix}'"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_names() {
        for name in ["prod", "staging-eu", "net_0", "app.v2", "日本"] {
            assert!(validate_name(name).is_ok(), "rejected {name:?}");
        }
    }

    #[test]
    fn test_rejects_empty_and_traversal() {
        for name in ["", ".", "..", "../prod", "a/b", "a\\b", "nul\0byte"] {
            assert!(
                matches!(validate_name(name), Err(CoreError::InvalidName { .. })),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn test_rejects_reserved_suffixes() {
        assert!(validate_name("prod.state").is_err());
        assert!(validate_name("prod.lock").is_err());
        // A suffix in the middle is fine.
        assert!(validate_name("prod.state.bak").is_ok());
    }
}
