//! Help documents.

use super::{open_workspace, with_hint};
use anyhow::Result;

/// Open a help document and print it.
pub fn run(doc: &str) -> Result<()> {
    let mut workspace = open_workspace()?;
    workspace.show_help(doc).map_err(with_hint)?;

    let current = workspace.session().current_file();
    println!("{}", current.content.as_deref().unwrap_or_default());
    Ok(())
}
