//! Initialize a new tabkeep workspace.

use super::with_hint;
use anyhow::Result;
use tabkeep_core::Workspace;

/// Initialize a new workspace in the current directory.
pub fn run() -> Result<()> {
    let workspace = Workspace::init(".").map_err(with_hint)?;

    println!("Initialized tabkeep workspace in .tabkeep/");
    println!();
    println!("Directory structure:");
    println!("  .tabkeep/config.toml    - Repositories, starred files and session options");
    println!("  .tabkeep/{}    - Persisted session state", workspace.config().store.file);
    println!("  .tabkeep/{}/            - Help documents", workspace.config().help.dir);
    println!();
    println!("Register a repository with 'tabkeep repos add <name> <path>'.");

    Ok(())
}
