//! Workspace handle: a state directory, its store and its repositories.

use crate::config::Config;
use crate::entity::{content_hash, EntityPatch, FileDescriptor};
use crate::error::{Result, SessionError};
use crate::lock::StoreLock;
use crate::service::{FsRepositoryService, RepositoryService};
use crate::session::EditorSession;
use crate::store::RedbStore;
use crate::types::{Repository, TreeNode};
use crate::uri::{rooted_path, FileUri};
use crate::TimeProvider;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the state directory under the workspace root.
pub const STATE_DIR: &str = ".tabkeep";

/// Name of the lock file inside the state directory.
pub const LOCK_FILE: &str = "LOCK";

/// Tabkeep workspace handle.
///
/// Owns the editor session for one state directory and holds the store lock
/// for as long as it lives.
pub struct Workspace {
    /// Directory containing `.tabkeep`.
    root: PathBuf,
    config: Config,
    service: FsRepositoryService,
    session: EditorSession,
    /// Released after the session (and its database) is closed.
    _lock: StoreLock,
}

impl Workspace {
    /// Opens an existing workspace.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if there is no state directory, or a lock
    /// error if another process has the workspace open.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tabkeep_core::Workspace;
    ///
    /// let workspace = Workspace::open(".").unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let state_dir = root.join(STATE_DIR);

        if !state_dir.is_dir() {
            return Err(SessionError::NotInitialized(root));
        }

        let lock = StoreLock::acquire(state_dir.join(LOCK_FILE))?;
        let config = Config::load(&state_dir)?;
        let store = RedbStore::open(state_dir.join(&config.store.file))?;
        let session = EditorSession::open_with_config(Box::new(store), &config.session)?;
        let service = build_service(&root, &config);

        debug!(root = %root.display(), "Opened workspace");

        Ok(Self {
            root,
            config,
            service,
            session,
            _lock: lock,
        })
    }

    /// Initializes a new workspace.
    ///
    /// Creates the state directory with a default config and an empty help
    /// directory, then opens it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tabkeep_core::Workspace;
    ///
    /// let workspace = Workspace::init(".").unwrap();
    /// ```
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let state_dir = root.join(STATE_DIR);

        if state_dir.exists() {
            return Err(SessionError::AlreadyInitialized(state_dir));
        }

        let config = Config::default();
        fs::create_dir_all(state_dir.join(&config.help.dir))?;
        config.save(&state_dir)?;

        let gitignore = "# tabkeep runtime files\nLOCK\n*.tmp\n";
        fs::write(state_dir.join(".gitignore"), gitignore)?;

        info!(root = %root.display(), "Initialized workspace");
        Self::open(root)
    }

    /// Sets a custom time provider (milliseconds since epoch) for testing.
    pub fn with_time_provider(mut self, provider: impl TimeProvider + 'static) -> Self {
        self.session = self.session.with_time_provider(provider);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the `.tabkeep` directory.
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &FsRepositoryService {
        &self.service
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    /// Registers a repository directory and saves the config.
    pub fn add_repository(&mut self, name: &str, path: impl Into<PathBuf>) -> Result<()> {
        self.config.upsert_repository(name, path);
        self.config.save(&self.state_dir())?;
        self.service = build_service(&self.root, &self.config);
        Ok(())
    }

    /// Loads repositories and starred files into the session.
    pub fn refresh(&mut self) -> Result<()> {
        self.session.fetch_repositories(&self.service)?;
        self.session.fetch_marked_files(&self.service)?;
        Ok(())
    }

    /// Looks up a configured repository by name.
    pub fn find_repository(&self, name: &str) -> Result<Repository> {
        self.service
            .fetch_repositories()?
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SessionError::RepositoryNotFound(name.to_string()))
    }

    /// Makes `name` the current repository and reopens its last file.
    pub fn use_repository(&mut self, name: &str) -> Result<FileUri> {
        let repo = self.find_repository(name)?;
        self.session.switch_current_repo(Some(repo))
    }

    /// Reads a file from disk and makes it the current file.
    ///
    /// The content read is recorded as the saved state. `path` is taken
    /// relative to the repository root with or without a leading `/`.
    pub fn open_file(&mut self, repo: &str, path: &str) -> Result<FileUri> {
        let path = rooted_path(path.trim_start_matches('/'));
        let content = self.service.read_file(repo, &path)?;
        let hash = content_hash(&content);

        let descriptor = FileDescriptor::at(repo, path).with_content(content.clone());
        let id = self.session.switch_current_file(Some(descriptor))?;
        self.session.merge_file(
            &id,
            EntityPatch::new()
                .hash(Some(hash.clone()))
                .prev_content(Some(content))
                .prev_hash(Some(hash)),
        );
        Ok(id)
    }

    /// Shows the blank entity.
    pub fn close_file(&mut self) -> Result<FileUri> {
        self.session.switch_current_file(None)
    }

    /// Loads the tree of `repo`, or of the current repository.
    pub fn load_tree(&mut self, repo: Option<&str>) -> Result<Option<&TreeNode>> {
        let repo = match repo {
            Some(name) => Some(self.find_repository(name)?),
            None => self.session.current_repo().cloned(),
        };
        self.session.fetch_tree(&self.service, repo.as_ref())?;
        Ok(self.session.tree())
    }

    /// Opens a help document.
    pub fn show_help(&mut self, doc: &str) -> Result<FileUri> {
        self.session.show_help(&self.service, doc)
    }
}

fn build_service(root: &Path, config: &Config) -> FsRepositoryService {
    FsRepositoryService::new(config.repository_list(root))
        .with_marked(config.marked.clone())
        .with_help_dir(root.join(STATE_DIR).join(&config.help.dir))
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("root", &self.root)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
