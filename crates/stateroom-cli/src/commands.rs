//! CLI command implementations.

use crate::output::{self, OutputFormat, WorkspaceList};
use anyhow::{bail, Context, Result};
use stateroom_core::LockInfo;
use stateroom_fs::WorkspaceStore;
use std::io::{Read, Write};
use std::path::Path;

/// List all workspaces with stored state.
pub fn workspaces(store: &WorkspaceStore, format: OutputFormat) -> Result<()> {
    let mut names = store.workspaces().context("Failed to list workspaces")?;
    names.sort();

    output::print(&WorkspaceList { workspaces: names }, format);
    Ok(())
}

/// Write a workspace's state bytes to stdout, optionally with its digest on
/// stderr.
pub fn get(store: &WorkspaceStore, workspace: &str, digest: bool) -> Result<()> {
    let payload = store
        .state(workspace)
        .context("Failed to read state")?
        .with_context(|| format!("Workspace '{workspace}' has no state"))?;

    std::io::stdout()
        .write_all(&payload.data)
        .context("Failed to write state to stdout")?;

    if digest {
        eprintln!("sha256:{}", payload.checksum_hex());
    }

    Ok(())
}

/// Replace a workspace's state from a file or stdin.
pub fn put(
    store: &WorkspaceStore,
    workspace: &str,
    file: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let data = match file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read state from {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read state from stdin")?;
            buf
        }
    };

    store
        .put_state(workspace, &data)
        .context("Failed to write state")?;

    output::print_success(
        &format!("Wrote {} bytes to workspace '{workspace}'", data.len()),
        format,
    );
    Ok(())
}

/// Delete a workspace's state file.
pub fn delete_state(store: &WorkspaceStore, workspace: &str, format: OutputFormat) -> Result<()> {
    store
        .delete_state(workspace)
        .context("Failed to delete state")?;

    output::print_success(&format!("Deleted state of workspace '{workspace}'"), format);
    Ok(())
}

/// Delete a workspace, warning about a held lock unless forced.
pub fn delete_workspace(
    store: &WorkspaceStore,
    workspace: &str,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    // The lock check is caller-side policy; the store itself never couples
    // deletion to lock state.
    if !force {
        if let Some(held) = store
            .lock_info(workspace)
            .context("Failed to inspect lock")?
        {
            bail!(
                "workspace '{workspace}' is locked (id {}); release it or pass --force",
                held.id
            );
        }
    }

    store
        .delete_workspace(workspace, force)
        .context("Failed to delete workspace")?;

    output::print_success(&format!("Deleted workspace '{workspace}'"), format);
    Ok(())
}

/// Acquire the advisory lock for a workspace and print the confirmed id.
pub fn lock(
    store: &WorkspaceStore,
    workspace: &str,
    id: Option<String>,
    who: Option<String>,
    operation: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut info = id.map_or_else(LockInfo::generate, LockInfo::new);
    if let Some(who) = who {
        info = info.with_who(who);
    }
    if let Some(operation) = operation {
        info = info.with_operation(operation);
    }

    let confirmed = store
        .lock(workspace, &info)
        .context("Failed to acquire lock")?;

    output::print_success(&confirmed, format);
    Ok(())
}

/// Release the advisory lock for a workspace.
pub fn unlock(
    store: &WorkspaceStore,
    workspace: &str,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    store
        .unlock(workspace, id)
        .context("Failed to release lock")?;

    output::print_success(&format!("Released lock on workspace '{workspace}'"), format);
    Ok(())
}

/// Show the current lock holder's metadata.
pub fn show_lock(store: &WorkspaceStore, workspace: &str, format: OutputFormat) -> Result<()> {
    match store.lock_info(workspace).context("Failed to read lock")? {
        Some(info) => output::print(&info, format),
        None => output::print_success(&format!("Workspace '{workspace}' is not locked"), format),
    }

    Ok(())
}
