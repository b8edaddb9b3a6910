//! Show the session cursor.

use super::{format_millis, open_workspace};
use anyhow::Result;
use console::style;

/// Print the current repository, file and panel state.
pub fn run() -> Result<()> {
    let workspace = open_workspace()?;
    let session = workspace.session();
    let current = session.current_file();

    println!("{}", style("Session:").bold());
    match session.current_repo() {
        Some(repo) => println!("  Repository: {}", style(&repo.name).cyan()),
        None => println!("  Repository: {}", style("(none)").dim()),
    }

    if current.is_blank() {
        println!(
            "  File:       {}",
            style(current.title.as_deref().unwrap_or_default()).dim()
        );
    } else {
        println!("  File:       {}", style(&current.path).cyan());
        println!("  URI:        {}", current.id);
        if let Some(opened) = current.open_time {
            println!("  Opened:     {}", format_millis(opened));
        }
        if current.is_modified() {
            println!("  State:      {}", style("modified").yellow());
        }
        if current.is_encrypted() {
            println!("  Encrypted:  yes");
        }
    }

    println!("  Tabs:       {}", session.tabs().len());
    println!(
        "  Side bar:   {}",
        if session.show_side() { "shown" } else { "hidden" }
    );
    println!(
        "  Preview:    {}",
        if session.show_view() { "shown" } else { "hidden" }
    );

    Ok(())
}
