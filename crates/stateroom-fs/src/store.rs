//! Workspace state and lock operations.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use stateroom_core::{validate_name, LockInfo, StatePayload, LOCK_SUFFIX, STATE_SUFFIX};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// A store managing workspace state files and advisory locks in one flat
/// directory.
///
/// Every operation maps to one or two filesystem calls against paths derived
/// from the workspace name; there is no in-process state beyond the
/// configuration. The store is safe to share across threads and processes
/// pointed at the same directory, but exclusion between writers is only as
/// strong as the lock protocol callers honor (see [`Self::lock`]).
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    config: StoreConfig,
}

impl WorkspaceStore {
    /// Create a store over the configured base directory.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The store's configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of a workspace's state file, after validating the name.
    fn state_path(&self, workspace: &str) -> Result<PathBuf> {
        validate_name(workspace)?;
        Ok(self
            .config
            .directory()
            .join(format!("{workspace}{STATE_SUFFIX}")))
    }

    /// Path of a workspace's lock file, after validating the name.
    fn lock_path(&self, workspace: &str) -> Result<PathBuf> {
        validate_name(workspace)?;
        Ok(self
            .config
            .directory()
            .join(format!("{workspace}{LOCK_SUFFIX}")))
    }

    /// List all workspaces that currently have a state file.
    ///
    /// Scans the base directory's immediate entries and strips the state
    /// suffix. Ordering reflects the directory listing and must not be
    /// relied on. Lock files do not count towards existence: a locked but
    /// never-written workspace is not listed.
    ///
    /// # Errors
    /// Returns `StoreError::Io` when the base directory cannot be read.
    pub fn workspaces(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(self.config.directory())? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(name) = file_name.strip_suffix(STATE_SUFFIX) {
                names.push(name.to_string());
            }
        }

        debug!(count = names.len(), "Listed workspaces");

        Ok(names)
    }

    /// Read a workspace's current state payload.
    ///
    /// Returns `Ok(None)` when no state file exists: "no state yet" is part
    /// of the contract, distinct from a failing read. On success the digest
    /// is computed over exactly the bytes returned.
    ///
    /// # Errors
    /// Returns `StoreError::Io` for any failure other than a missing file.
    pub fn state(&self, workspace: &str) -> Result<Option<StatePayload>> {
        let path = self.state_path(workspace)?;

        match fs::read(&path) {
            Ok(data) => {
                let payload = StatePayload::new(data);
                debug!(workspace, len = payload.len(), "Read state");
                Ok(Some(payload))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace a workspace's state payload with the given bytes.
    ///
    /// A full-file overwrite, creating the file if absent. The store does
    /// not require the caller to hold the workspace's lock; coordinating
    /// writes through [`Self::lock`] is the caller's responsibility. The
    /// write is not staged through a rename, so a crash mid-write can leave
    /// a truncated state file.
    ///
    /// # Errors
    /// Returns `StoreError::Io` on any write failure.
    pub fn put_state(&self, workspace: &str, data: &[u8]) -> Result<()> {
        let path = self.state_path(workspace)?;
        fs::write(&path, data)?;

        info!(workspace, len = data.len(), "Wrote state");

        Ok(())
    }

    /// Remove a workspace's state file.
    ///
    /// # Errors
    /// Returns `StoreError::StateNotFound` when there is no state file, and
    /// `StoreError::Io` when removal fails for any other reason.
    pub fn delete_state(&self, workspace: &str) -> Result<()> {
        let path = self.state_path(workspace)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(workspace, "Deleted state");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::StateNotFound(workspace.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a workspace entirely.
    ///
    /// Performs the same removal as [`Self::delete_state`]. The `force` flag
    /// is advisory metadata from the caller's own policy (bypassing its
    /// locked/empty checks); the store records it but enforces nothing
    /// either way. Any lock file is left behind and must be released or
    /// cleaned up separately.
    ///
    /// # Errors
    /// Same contract as [`Self::delete_state`].
    pub fn delete_workspace(&self, workspace: &str, force: bool) -> Result<()> {
        info!(workspace, force, "Deleting workspace");
        self.delete_state(workspace)
    }

    /// Acquire the advisory lock for a workspace.
    ///
    /// Creates the lock file with exclusive semantics in a single atomic
    /// step, so at most one concurrent acquirer can succeed. The supplied
    /// metadata becomes the file's content and the caller-chosen id is
    /// echoed back as confirmation. There is no blocking, queueing, or
    /// expiry; losers get `LockHeld` immediately and choose their own
    /// retry policy.
    ///
    /// # Errors
    /// Returns `StoreError::LockHeld` when the lock file already exists,
    /// `StoreError::Format` if the metadata cannot be serialized, and
    /// `StoreError::Io` for other filesystem failures.
    pub fn lock(&self, workspace: &str, lock_info: &LockInfo) -> Result<String> {
        let path = self.lock_path(workspace)?;
        let content = serde_json::to_vec(lock_info)?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::LockHeld(workspace.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&content)?;

        info!(workspace, id = %lock_info.id, "Acquired lock");

        Ok(lock_info.id.clone())
    }

    /// Release the advisory lock for a workspace.
    ///
    /// Reads the held lock's metadata and removes the lock file only when
    /// the presented id matches the one it was created with; on a mismatch
    /// the lock is left intact.
    ///
    /// # Errors
    /// Returns `StoreError::LockNotFound` when no lock file exists,
    /// `StoreError::Format` when its content does not parse,
    /// `StoreError::LockMismatch` when the id differs, and `StoreError::Io`
    /// when the file cannot be read or removed.
    pub fn unlock(&self, workspace: &str, id: &str) -> Result<()> {
        let path = self.lock_path(workspace)?;

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::LockNotFound(workspace.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let held: LockInfo = serde_json::from_slice(&content)?;

        if held.id != id {
            debug!(workspace, held = %held.id, presented = %id, "Lock id mismatch");
            return Err(StoreError::LockMismatch {
                workspace: workspace.to_string(),
            });
        }

        fs::remove_file(&path)?;

        info!(workspace, id, "Released lock");

        Ok(())
    }

    /// Inspect the current lock holder without touching the lock.
    ///
    /// Returns `Ok(None)` when the workspace is unlocked.
    ///
    /// # Errors
    /// Returns `StoreError::Format` when the lock file's content does not
    /// parse and `StoreError::Io` when it cannot be read.
    pub fn lock_info(&self, workspace: &str) -> Result<Option<LockInfo>> {
        let path = self.lock_path(workspace)?;

        match fs::read(&path) {
            Ok(content) => Ok(Some(serde_json::from_slice(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stateroom_core::CoreError;
    use tempfile::TempDir;

    fn setup() -> (TempDir, WorkspaceStore) {
        let tmp = TempDir::new().unwrap();
        let store = WorkspaceStore::new(StoreConfig::new(tmp.path()));
        (tmp, store)
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"state bytes").unwrap();
        let payload = store.state("prod").unwrap().unwrap();

        assert_eq!(payload.data, b"state bytes");
        assert_eq!(payload.checksum, StatePayload::new(b"state bytes".to_vec()).checksum);
    }

    #[test]
    fn test_digest_stable_across_reads() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        let first = store.state("prod").unwrap().unwrap();
        let second = store.state("prod").unwrap().unwrap();
        assert_eq!(first.checksum, second.checksum);
    }

    #[test]
    fn test_get_without_state_is_none() {
        let (_tmp, store) = setup();
        assert!(store.state("prod").unwrap().is_none());
    }

    #[test]
    fn test_put_overwrites_fully() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"a much longer first payload").unwrap();
        store.put_state("prod", b"v2").unwrap();

        let payload = store.state("prod").unwrap().unwrap();
        assert_eq!(payload.data, b"v2");
    }

    #[test]
    fn test_delete_state_removes_file() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        store.delete_state("prod").unwrap();

        assert!(store.state("prod").unwrap().is_none());
    }

    #[test]
    fn test_delete_state_missing_fails() {
        let (_tmp, store) = setup();

        let result = store.delete_state("prod");
        assert!(matches!(result, Err(StoreError::StateNotFound(_))));
    }

    #[test]
    fn test_delete_workspace_ignores_force_value() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        store.delete_workspace("prod", false).unwrap();

        store.put_state("prod", b"v1").unwrap();
        store.delete_workspace("prod", true).unwrap();

        assert!(store.state("prod").unwrap().is_none());
    }

    #[test]
    fn test_delete_workspace_leaves_lock_behind() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        store.lock("prod", &LockInfo::new("tok1")).unwrap();
        store.delete_workspace("prod", true).unwrap();

        // The lock survives deletion and must be released on its own.
        assert!(store.lock_info("prod").unwrap().is_some());
        store.unlock("prod", "tok1").unwrap();
    }

    #[test]
    fn test_list_reflects_state_files_only() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        store.put_state("staging", b"v1").unwrap();
        // Locked but stateless workspace must not appear.
        store.lock("scratch", &LockInfo::new("tok1")).unwrap();

        let mut names = store.workspaces().unwrap();
        names.sort();
        assert_eq!(names, ["prod", "staging"]);
    }

    #[test]
    fn test_list_empty_directory() {
        let (_tmp, store) = setup();
        assert!(store.workspaces().unwrap().is_empty());
    }

    #[test]
    fn test_list_unreadable_directory_fails() {
        let store = WorkspaceStore::new(StoreConfig::new("/does/not/exist/anywhere"));
        assert!(matches!(store.workspaces(), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_lock_returns_supplied_id() {
        let (_tmp, store) = setup();

        let id = store.lock("prod", &LockInfo::new("tok1")).unwrap();
        assert_eq!(id, "tok1");
    }

    #[test]
    fn test_second_lock_fails_and_first_survives() {
        let (_tmp, store) = setup();

        store.lock("prod", &LockInfo::new("tokA")).unwrap();
        let result = store.lock("prod", &LockInfo::new("tokB"));
        assert!(matches!(result, Err(StoreError::LockHeld(_))));

        let held = store.lock_info("prod").unwrap().unwrap();
        assert_eq!(held.id, "tokA");
    }

    #[test]
    fn test_unlock_then_relock() {
        let (_tmp, store) = setup();

        store.lock("prod", &LockInfo::new("tokA")).unwrap();
        store.unlock("prod", "tokA").unwrap();
        store.lock("prod", &LockInfo::new("tokB")).unwrap();
    }

    #[test]
    fn test_unlock_wrong_id_leaves_lock_held() {
        let (_tmp, store) = setup();

        store.lock("prod", &LockInfo::new("tokA")).unwrap();
        let result = store.unlock("prod", "tokB");
        assert!(matches!(result, Err(StoreError::LockMismatch { .. })));

        let held = store.lock_info("prod").unwrap().unwrap();
        assert_eq!(held.id, "tokA");
    }

    #[test]
    fn test_unlock_without_lock_fails() {
        let (_tmp, store) = setup();

        let result = store.unlock("prod", "anything");
        assert!(matches!(result, Err(StoreError::LockNotFound(_))));
    }

    #[test]
    fn test_unlock_malformed_lock_file_fails() {
        let (tmp, store) = setup();

        std::fs::write(tmp.path().join("prod.lock"), b"not json at all").unwrap();

        let result = store.unlock("prod", "tok1");
        assert!(matches!(result, Err(StoreError::Format(_))));
        // The broken lock file stays in place for the operator to inspect.
        assert!(tmp.path().join("prod.lock").exists());
    }

    #[test]
    fn test_lock_metadata_round_trips() {
        let (_tmp, store) = setup();

        let info = LockInfo::new("tok1")
            .with_operation("apply")
            .with_who("alice@ci")
            .with_extra("version", "1.5.7");
        store.lock("prod", &info).unwrap();

        let held = store.lock_info("prod").unwrap().unwrap();
        assert_eq!(held, info);
    }

    #[test]
    fn test_lock_info_unlocked_is_none() {
        let (_tmp, store) = setup();
        assert!(store.lock_info("prod").unwrap().is_none());
    }

    #[test]
    fn test_put_does_not_require_lock() {
        let (_tmp, store) = setup();

        store.lock("prod", &LockInfo::new("tok1")).unwrap();
        // Advisory only: the store never couples writes to lock ownership.
        store.put_state("prod", b"v2").unwrap();
    }

    #[test]
    fn test_invalid_names_rejected_everywhere() {
        let (_tmp, store) = setup();

        for name in ["", "../etc", "a/b", "prod.state", "prod.lock"] {
            assert!(
                matches!(
                    store.state(name),
                    Err(StoreError::Core(CoreError::InvalidName { .. }))
                ),
                "state() accepted {name:?}"
            );
            assert!(store.put_state(name, b"x").is_err(), "put_state accepted {name:?}");
            assert!(store.delete_state(name).is_err(), "delete accepted {name:?}");
            assert!(
                store.lock(name, &LockInfo::new("t")).is_err(),
                "lock accepted {name:?}"
            );
            assert!(store.unlock(name, "t").is_err(), "unlock accepted {name:?}");
        }
    }

    #[test]
    fn test_files_live_flat_in_base_directory() {
        let (tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        store.lock("prod", &LockInfo::new("tok1")).unwrap();

        assert!(tmp.path().join("prod.state").exists());
        assert!(tmp.path().join("prod.lock").exists());
    }

    #[test]
    fn test_full_scenario() {
        let (_tmp, store) = setup();

        store.put_state("prod", b"v1").unwrap();
        let payload = store.state("prod").unwrap().unwrap();
        assert_eq!(payload.data, b"v1");
        assert_eq!(payload.checksum, StatePayload::new(b"v1".to_vec()).checksum);

        let id = store.lock("prod", &LockInfo::new("tok1")).unwrap();
        assert_eq!(id, "tok1");

        // Store does not enforce lock-before-write.
        store.put_state("prod", b"v2").unwrap();

        store.unlock("prod", "tok1").unwrap();
        let again = store.unlock("prod", "tok1");
        assert!(matches!(again, Err(StoreError::LockNotFound(_))));
    }
}
