//! Repository tree listing.

use super::{open_workspace, with_hint};
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tabkeep_core::{TreeNode, TreeNodeKind};

/// Print the tree of a repository.
pub fn run(repo: Option<&str>) -> Result<()> {
    let mut workspace = open_workspace()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?,
    );
    pb.set_message("Scanning repository...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = workspace.load_tree(repo).map_err(with_hint);
    pb.finish_and_clear();

    match result? {
        Some(tree) => {
            println!("{}", style(&tree.name).bold());
            print_children(tree, 1);
            println!();
            println!("{} file(s)", tree.file_count());
        }
        None => {
            println!("No repository selected. Use 'tabkeep use <repo>' or pass a name.");
        }
    }

    Ok(())
}

fn print_children(node: &TreeNode, depth: usize) {
    for child in &node.children {
        let indent = "  ".repeat(depth);
        match child.kind {
            TreeNodeKind::Dir => {
                println!("{}{}/", indent, style(&child.name).blue());
                print_children(child, depth + 1);
            }
            TreeNodeKind::File => println!("{}{}", indent, child.name),
        }
    }
}
