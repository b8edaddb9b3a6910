//! Repository listing and registration.

use super::{open_workspace, with_hint};
use anyhow::Result;
use console::style;
use std::path::PathBuf;

/// List configured repositories, marking the current one.
pub fn list() -> Result<()> {
    let mut workspace = open_workspace()?;
    workspace.refresh().map_err(with_hint)?;

    let session = workspace.session();
    if session.repositories().is_empty() {
        println!("No repositories configured.");
        println!("Use 'tabkeep repos add <name> <path>' to register one.");
        return Ok(());
    }

    let current = session.current_repo().map(|r| r.name.as_str());
    for repo in session.repositories() {
        let marker = if Some(repo.name.as_str()) == current {
            style("*").green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {:20} {}",
            marker,
            repo.name,
            style(repo.path.as_deref().unwrap_or("-")).dim()
        );
    }

    Ok(())
}

/// Register a repository directory.
pub fn add(name: &str, path: PathBuf) -> Result<()> {
    let mut workspace = open_workspace()?;
    workspace
        .add_repository(name, path.clone())
        .map_err(with_hint)?;

    println!(
        "{} Registered repository {} at {}",
        style("✓").green(),
        style(name).cyan(),
        path.display()
    );
    Ok(())
}
