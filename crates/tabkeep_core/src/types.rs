//! Values supplied by the repository service and transient UI state.

use serde::{Deserialize, Serialize};

/// A repository (workspace) the editor can switch to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique repository name.
    pub name: String,
    /// Location on disk, if the service exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Repository {
    /// Creates a repository without a known location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// Creates a repository rooted at `path`.
    pub fn at(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNodeKind {
    /// A directory with children.
    Dir,
    /// A regular file.
    File,
}

/// File hierarchy of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Entry name (the repository name for the root).
    pub name: String,
    /// Repository-rooted path (`/` for the root).
    pub path: String,
    /// Repository the entry belongs to.
    pub repo: String,
    /// Entry kind.
    pub kind: TreeNodeKind,
    /// Children, directories first, each group sorted by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Counts files in this subtree.
    pub fn file_count(&self) -> usize {
        match self.kind {
            TreeNodeKind::File => 1,
            TreeNodeKind::Dir => self.children.iter().map(TreeNode::file_count).sum(),
        }
    }

    /// Finds the node at `path`.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }
}

/// A starred file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedFile {
    /// Repository name.
    pub repo: String,
    /// Repository-rooted path.
    pub path: String,
    /// Display name; filled from `path` when loaded.
    #[serde(default)]
    pub name: String,
}

/// Cursor and selection statistics of the focused editor. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub text_length: usize,
    pub selected_length: usize,
    pub line_count: usize,
    pub line: usize,
    pub column: usize,
}
