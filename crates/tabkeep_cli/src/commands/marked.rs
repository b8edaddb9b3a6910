//! Starred files.

use super::{open_workspace, with_hint};
use anyhow::Result;
use console::style;

pub fn run() -> Result<()> {
    let mut workspace = open_workspace()?;
    workspace.refresh().map_err(with_hint)?;

    let marked = workspace.session().marked_files();
    if marked.is_empty() {
        println!("No starred files. Add [[marked]] entries to .tabkeep/config.toml.");
        return Ok(());
    }

    for file in marked {
        println!(
            "{} {:24} {}",
            style("★").yellow(),
            file.name,
            style(format!("{}:{}", file.repo, file.path)).dim()
        );
    }
    Ok(())
}
