//! Switching repositories and files.

use super::{open_workspace, with_hint};
use anyhow::{Context, Result};
use console::style;

/// Switch to a repository and reopen the file last used there.
pub fn use_repo(repo: &str) -> Result<()> {
    let mut workspace = open_workspace()?;
    workspace.use_repository(repo).map_err(with_hint)?;

    let current = workspace.session().current_file();
    if current.is_blank() {
        println!(
            "Switched to {} (no recent file)",
            style(repo).cyan()
        );
    } else {
        println!(
            "Switched to {}, reopened {}",
            style(repo).cyan(),
            style(&current.path).cyan()
        );
    }
    Ok(())
}

/// Open a file as the current file.
pub fn open(repo: &str, path: &str) -> Result<()> {
    let mut workspace = open_workspace()?;
    let id = workspace
        .open_file(repo, path)
        .with_context(|| format!("Failed to open {}:{}", repo, path))?;

    println!("{} Opened {}", style("✓").green(), id);
    Ok(())
}

/// Close the current file.
pub fn close() -> Result<()> {
    let mut workspace = open_workspace()?;
    workspace.close_file().map_err(with_hint)?;

    println!("Closed the current file");
    Ok(())
}
