//! stateroom CLI - Workspace state and lock administration from the command line.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stateroom_fs::{StoreConfig, WorkspaceStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "stateroom")]
#[command(author, version, about = "Workspace state storage CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    format: output::OutputFormat,

    /// Base directory holding workspace state and lock files
    #[arg(long, short = 'C', env = "STATEROOM_DIR")]
    dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all workspaces with stored state
    #[command(alias = "ls")]
    Workspaces,

    /// Write a workspace's state bytes to stdout
    Get {
        /// Workspace name
        workspace: String,

        /// Also print the state digest to stderr
        #[arg(long)]
        digest: bool,
    },

    /// Replace a workspace's state from a file or stdin
    Put {
        /// Workspace name
        workspace: String,

        /// Read state bytes from this file instead of stdin
        #[arg(long, short = 'f')]
        file: Option<std::path::PathBuf>,
    },

    /// Delete a workspace's state file
    DeleteState {
        /// Workspace name
        workspace: String,
    },

    /// Delete a workspace
    DeleteWorkspace {
        /// Workspace name
        workspace: String,

        /// Skip caller-side safety checks (advisory; recorded, not enforced)
        #[arg(long)]
        force: bool,
    },

    /// Acquire the advisory lock for a workspace
    Lock {
        /// Workspace name
        workspace: String,

        /// Lock id (a UUID is generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Holder identity to record in the lock metadata
        #[arg(long)]
        who: Option<String>,

        /// Operation to record in the lock metadata
        #[arg(long)]
        operation: Option<String>,
    },

    /// Release the advisory lock for a workspace
    Unlock {
        /// Workspace name
        workspace: String,

        /// Id the lock was acquired with
        id: String,
    },

    /// Show the current lock holder's metadata
    ShowLock {
        /// Workspace name
        workspace: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let store = WorkspaceStore::new(StoreConfig::new(cli.dir));
    tracing::debug!(dir = %store.config().directory().display(), "Opened store");

    match cli.command {
        Commands::Workspaces => commands::workspaces(&store, cli.format),
        Commands::Get { workspace, digest } => commands::get(&store, &workspace, digest),
        Commands::Put { workspace, file } => {
            commands::put(&store, &workspace, file.as_deref(), cli.format)
        }
        Commands::DeleteState { workspace } => {
            commands::delete_state(&store, &workspace, cli.format)
        }
        Commands::DeleteWorkspace { workspace, force } => {
            commands::delete_workspace(&store, &workspace, force, cli.format)
        }
        Commands::Lock {
            workspace,
            id,
            who,
            operation,
        } => commands::lock(&store, &workspace, id, who, operation, cli.format),
        Commands::Unlock { workspace, id } => {
            commands::unlock(&store, &workspace, &id, cli.format)
        }
        Commands::ShowLock { workspace } => commands::show_lock(&store, &workspace, cli.format),
    }
}
