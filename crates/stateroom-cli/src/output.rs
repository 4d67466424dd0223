//! Output formatting for the CLI.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stateroom_core::LockInfo;
use std::fmt::Write;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
}

/// Values that know how to render themselves for a human.
pub trait HumanDisplay {
    fn human_display(&self) -> String;
}

/// Print output in the specified format.
pub fn print<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Human => println!("{}", value.human_display()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).expect("Failed to serialize to JSON")
            );
        }
    }
}

/// Print a success message in the specified format.
pub fn print_success(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Human => println!("{message}"),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "status": "ok", "message": message })
            );
        }
    }
}

/// A listing of workspace names.
#[derive(Debug, Serialize)]
pub struct WorkspaceList {
    pub workspaces: Vec<String>,
}

impl HumanDisplay for WorkspaceList {
    fn human_display(&self) -> String {
        if self.workspaces.is_empty() {
            "No workspaces found.".to_string()
        } else {
            self.workspaces.join("\n")
        }
    }
}

impl HumanDisplay for LockInfo {
    fn human_display(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "id:        {}", self.id);
        if let Some(who) = &self.who {
            let _ = writeln!(out, "who:       {who}");
        }
        if let Some(operation) = &self.operation {
            let _ = writeln!(out, "operation: {operation}");
        }
        if let Some(created) = &self.created {
            let _ = writeln!(out, "created:   {}", format_timestamp(created));
        }
        for (key, value) in &self.extra {
            let _ = writeln!(out, "{key}: {value}");
        }
        out.trim_end().to_string()
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
