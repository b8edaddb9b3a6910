//! Tab list and panel toggles.

use super::{open_workspace, with_hint};
use anyhow::Result;
use console::style;

/// List open tabs, marking the current file.
pub fn list() -> Result<()> {
    let workspace = open_workspace()?;
    let session = workspace.session();

    if session.tabs().is_empty() {
        println!("No open tabs.");
        return Ok(());
    }

    for (i, tab) in session.tabs().iter().enumerate() {
        let marker = if tab == session.current_file_id() {
            style("*").green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {:>3}  {}", marker, i + 1, tab);
    }
    Ok(())
}

/// Add the current file as a tab.
pub fn pin() -> Result<()> {
    let mut workspace = open_workspace()?;
    let session = workspace.session_mut();

    let current = session.current_file_id().clone();
    if current.is_blank() {
        anyhow::bail!("No file open. Use 'tabkeep open <repo> <path>' first.");
    }
    if session.tabs().contains(&current) {
        println!("Already pinned: {}", current);
        return Ok(());
    }

    let mut tabs = session.tabs().to_vec();
    tabs.push(current.clone());
    session.set_tabs(tabs).map_err(with_hint)?;

    println!("{} Pinned {}", style("✓").green(), current);
    Ok(())
}

/// Remove the tab at a 1-based position.
pub fn remove(index: usize) -> Result<()> {
    let mut workspace = open_workspace()?;
    let session = workspace.session_mut();

    let mut tabs = session.tabs().to_vec();
    if index == 0 || index > tabs.len() {
        anyhow::bail!("No tab at position {} ({} open)", index, tabs.len());
    }
    let removed = tabs.remove(index - 1);
    session.set_tabs(tabs).map_err(with_hint)?;

    println!("Removed {}", removed);
    Ok(())
}

pub fn toggle_side() -> Result<()> {
    let mut workspace = open_workspace()?;
    let session = workspace.session_mut();
    let show = !session.show_side();
    session.set_show_side(show).map_err(with_hint)?;

    println!("Side bar {}", if show { "shown" } else { "hidden" });
    Ok(())
}

pub fn toggle_view() -> Result<()> {
    let mut workspace = open_workspace()?;
    let session = workspace.session_mut();
    let show = !session.show_view();
    session.set_show_view(show).map_err(with_hint)?;

    println!("Preview {}", if show { "shown" } else { "hidden" });
    Ok(())
}
