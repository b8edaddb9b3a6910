//! CLI commands.

pub mod help;
pub mod init;
pub mod marked;
pub mod open;
pub mod recent;
pub mod repos;
pub mod status;
pub mod tabs;
pub mod tree;

use anyhow::Result;
use chrono::{DateTime, Local};
use tabkeep_core::{SessionError, Workspace};
use tracing::debug;

/// Opens the workspace in the current directory.
///
/// Errors carry the core's recovery hint when one exists.
pub(crate) fn open_workspace() -> Result<Workspace> {
    Workspace::open(".").map_err(with_hint)
}

/// Converts a core error into an `anyhow` error with its recovery hint.
pub(crate) fn with_hint(err: SessionError) -> anyhow::Error {
    debug!(error = ?err, "Command failed in core");
    match err.recovery_suggestion() {
        Some(hint) => anyhow::anyhow!("{}\n  hint: {}", err, hint),
        None => err.into(),
    }
}

/// Formats a millisecond timestamp in local time.
pub(crate) fn format_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}
