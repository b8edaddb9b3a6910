//! Recently opened files.

use super::{format_millis, open_workspace};
use anyhow::Result;
use console::style;

/// Print recency entries, newest first.
pub fn run(repo: Option<&str>, limit: usize, all: bool) -> Result<()> {
    let workspace = open_workspace()?;
    let session = workspace.session();
    let recency = session.recency();

    let repos: Vec<String> = if all {
        recency.repos().into_iter().map(str::to_string).collect()
    } else {
        match repo.or(session.current_repo().map(|r| r.name.as_str())) {
            Some(name) => vec![name.to_string()],
            None => {
                anyhow::bail!("No current repository. Pass a repository name or --all.");
            }
        }
    };

    if recency.is_empty() {
        println!("No files opened yet.");
        return Ok(());
    }

    for name in repos {
        println!("{}", style(&name).bold());
        let entries = recency.entries_for(&name);
        if entries.is_empty() {
            println!("  {}", style("(nothing opened)").dim());
            continue;
        }
        for entry in entries.iter().take(limit) {
            println!(
                "  {}  {}",
                style(format_millis(entry.time)).dim(),
                entry.path
            );
        }
    }

    Ok(())
}
