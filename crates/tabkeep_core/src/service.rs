//! Repository service: where repositories, trees and help documents come from.

use crate::error::{Result, SessionError};
use crate::types::{MarkedFile, Repository, TreeNode, TreeNodeKind};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loader capabilities consumed by the session.
///
/// Calls block until the data is available; the session commits each result
/// with a single replace.
pub trait RepositoryService {
    /// Lists the repositories the editor can switch to.
    fn fetch_repositories(&self) -> Result<Vec<Repository>>;

    /// Loads the file tree of a repository.
    fn fetch_tree(&self, repo_name: &str) -> Result<TreeNode>;

    /// Lists starred files.
    fn marked_files(&self) -> Result<Vec<MarkedFile>>;

    /// Loads a help document by name.
    fn fetch_help_content(&self, doc: &str) -> Result<String>;
}

/// Serves repositories from directories on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsRepositoryService {
    repositories: Vec<Repository>,
    marked: Vec<MarkedFile>,
    help_dir: Option<PathBuf>,
}

impl FsRepositoryService {
    /// Creates a service over the given repositories.
    ///
    /// Repositories without a path cannot produce a tree.
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            marked: Vec::new(),
            help_dir: None,
        }
    }

    /// Sets the starred files.
    pub fn with_marked(mut self, marked: Vec<MarkedFile>) -> Self {
        self.marked = marked;
        self
    }

    /// Sets the directory help documents are read from.
    pub fn with_help_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.help_dir = Some(dir.into());
        self
    }

    /// Reads a file of a repository.
    pub fn read_file(&self, repo_name: &str, path: &str) -> Result<String> {
        let root = self.root_of(repo_name)?;
        let full = root.join(path.trim_start_matches('/'));
        Ok(fs::read_to_string(full)?)
    }

    fn root_of(&self, repo_name: &str) -> Result<PathBuf> {
        self.repositories
            .iter()
            .find(|r| r.name == repo_name)
            .and_then(|r| r.path.as_ref())
            .map(PathBuf::from)
            .ok_or_else(|| SessionError::RepositoryNotFound(repo_name.to_string()))
    }
}

impl RepositoryService for FsRepositoryService {
    fn fetch_repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.repositories.clone())
    }

    fn fetch_tree(&self, repo_name: &str) -> Result<TreeNode> {
        let root = self.root_of(repo_name)?;
        if !root.is_dir() {
            return Err(SessionError::LoadFailed {
                what: format!("tree of {}", repo_name),
                reason: format!("{} is not a directory", root.display()),
            });
        }

        let children = walk(&root, "", repo_name)?;
        debug!(repo = repo_name, entries = children.len(), "Loaded repository tree");

        Ok(TreeNode {
            name: repo_name.to_string(),
            path: "/".to_string(),
            repo: repo_name.to_string(),
            kind: TreeNodeKind::Dir,
            children,
        })
    }

    fn marked_files(&self) -> Result<Vec<MarkedFile>> {
        Ok(self.marked.clone())
    }

    fn fetch_help_content(&self, doc: &str) -> Result<String> {
        let dir = self
            .help_dir
            .as_ref()
            .ok_or_else(|| SessionError::HelpNotFound(doc.to_string()))?;

        // Help documents are flat files; reject anything that walks out.
        if doc.is_empty() || doc.contains('/') || doc.contains('\\') || doc == ".." {
            return Err(SessionError::HelpNotFound(doc.to_string()));
        }

        let path = dir.join(doc);
        if !path.is_file() {
            return Err(SessionError::HelpNotFound(doc.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// Recursively lists `dir`, skipping hidden entries.
fn walk(dir: &Path, prefix: &str, repo: &str) -> Result<Vec<TreeNode>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = format!("{}/{}", prefix, name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            let children = walk(&entry.path(), &path, repo)?;
            dirs.push(TreeNode {
                name,
                path,
                repo: repo.to_string(),
                kind: TreeNodeKind::Dir,
                children,
            });
        } else if file_type.is_file() {
            files.push(TreeNode {
                name,
                path,
                repo: repo.to_string(),
                kind: TreeNodeKind::File,
                children: Vec::new(),
            });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.extend(files);
    Ok(dirs)
}
