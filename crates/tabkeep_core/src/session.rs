//! Editor session: the current repository, the current file, and everything
//! that must survive a restart.

use crate::cache::OpenedFiles;
use crate::config::SessionConfig;
use crate::entity::{EntityPatch, FileDescriptor, FileEntity, LastOpened};
use crate::error::Result;
use crate::recency::{RecencySnapshot, RecencyTracker};
use crate::service::RepositoryService;
use crate::store::{
    KeyValueStore, StoreExt, KEY_CURRENT_FILE_ID, KEY_CURRENT_REPO, KEY_RECENT_OPEN_TIME,
    KEY_SHOW_SIDE, KEY_SHOW_VIEW, KEY_TABS,
};
use crate::types::{DocumentInfo, MarkedFile, Repository, TreeNode};
use crate::uri::{basename, rooted_path, FileUri};
use crate::TimeProvider;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Repository name used for help documents.
pub const HELP_REPO: &str = "__help__";

/// Session state of one editor window.
///
/// Every mutation that must survive a restart is written through to the
/// injected store before the method returns.
pub struct EditorSession {
    store: Box<dyn KeyValueStore>,
    opened: OpenedFiles,
    recency: RecencyTracker,
    current_repo: Option<Repository>,
    current_file_id: FileUri,

    repositories: Vec<Repository>,
    tree: Option<TreeNode>,
    marked_files: Vec<MarkedFile>,

    tabs: Vec<FileUri>,
    show_side: bool,
    show_view: bool,
    show_xterm: bool,
    document_info: DocumentInfo,

    /// Time provider for testing (None = use system time).
    time_provider: Option<Arc<dyn TimeProvider>>,
}

impl EditorSession {
    /// Opens a session over `store` with default settings.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self> {
        Self::open_with_config(store, &SessionConfig::default())
    }

    /// Opens a session, restoring where the user left off.
    ///
    /// Reads the persisted repository and recency map, then seeds the cache
    /// with a placeholder for the last file opened in that repository. The
    /// placeholder becomes a full entity on first mutation.
    pub fn open_with_config(store: Box<dyn KeyValueStore>, config: &SessionConfig) -> Result<Self> {
        let current_repo: Option<Repository> = store.get(KEY_CURRENT_REPO, None)?;
        let recency = RecencyTracker::from_snapshot(
            store.get(KEY_RECENT_OPEN_TIME, RecencySnapshot::default())?,
        );
        let tabs = load_tabs(store.as_ref())?;
        let show_side = store.get(KEY_SHOW_SIDE, true)?;
        let show_view = store.get(KEY_SHOW_VIEW, true)?;

        let last_file = if config.restore_last_file {
            current_repo
                .as_ref()
                .and_then(|repo| recency.most_recent(&repo.name))
        } else {
            None
        };

        let init_file_id = last_file
            .as_ref()
            .map(LastOpened::uri)
            .unwrap_or_else(FileUri::blank);

        let mut opened = OpenedFiles::with_blank_title(config.blank_title.clone());
        opened.seed(init_file_id.clone(), last_file);

        debug!(
            repo = current_repo.as_ref().map(|r| r.name.as_str()),
            file = %init_file_id,
            "Opened editor session"
        );

        Ok(Self {
            store,
            opened,
            recency,
            current_repo,
            current_file_id: init_file_id,
            repositories: Vec::new(),
            tree: None,
            marked_files: Vec::new(),
            tabs,
            show_side,
            show_view,
            show_xterm: false,
            document_info: DocumentInfo::default(),
            time_provider: None,
        })
    }

    /// Sets a custom time provider (milliseconds since epoch) for testing.
    pub fn with_time_provider(mut self, provider: impl TimeProvider + 'static) -> Self {
        self.time_provider = Some(Arc::new(provider));
        self
    }

    // ===== Queries =====

    /// The entity of the focused file, or the blank entity.
    pub fn current_file(&self) -> Cow<'_, FileEntity> {
        self.opened.get(&self.current_file_id)
    }

    /// The entity for `id`, or the blank entity.
    pub fn opened_file(&self, id: &FileUri) -> Cow<'_, FileEntity> {
        self.opened.get(id)
    }

    /// URI of the focused file.
    pub fn current_file_id(&self) -> &FileUri {
        &self.current_file_id
    }

    /// The active repository, if one was chosen.
    pub fn current_repo(&self) -> Option<&Repository> {
        self.current_repo.as_ref()
    }

    /// The opened-file cache.
    pub fn opened_files(&self) -> &OpenedFiles {
        &self.opened
    }

    /// The recency history.
    pub fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    pub fn marked_files(&self) -> &[MarkedFile] {
        &self.marked_files
    }

    pub fn tabs(&self) -> &[FileUri] {
        &self.tabs
    }

    pub fn show_side(&self) -> bool {
        self.show_side
    }

    pub fn show_view(&self) -> bool {
        self.show_view
    }

    pub fn show_xterm(&self) -> bool {
        self.show_xterm
    }

    pub fn document_info(&self) -> DocumentInfo {
        self.document_info
    }

    /// The backing store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Consumes the session and returns its store.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    // ===== Switching =====

    /// Focuses a file, or the blank entity when `descriptor` is `None`.
    ///
    /// The entity's open time and the recency entry of its repository/path
    /// receive the same timestamp, strictly later than the previous open of
    /// that file. Both the cursor and the recency map are persisted.
    pub fn switch_current_file(&mut self, descriptor: Option<FileDescriptor>) -> Result<FileUri> {
        let id = FileUri::from_descriptor(descriptor.as_ref());

        let (repo, path, prev_open) = {
            let existing = self.opened.get(&id);
            match &descriptor {
                Some(d) => (d.repo.clone(), rooted_path(&d.path), existing.open_time),
                None => (
                    existing.repo.clone(),
                    existing.path.clone(),
                    existing.open_time,
                ),
            }
        };

        let clock = self.now();
        let floor = prev_open.max(self.recency.get(&repo, &path));
        let now = match floor {
            Some(t) if t >= clock => t.saturating_add(1),
            _ => clock,
        };

        // In-memory state first; the store writes below may fail.
        let id = self.opened.set_current(descriptor.as_ref(), now);
        self.current_file_id = id.clone();
        self.recency.record(&repo, &path, now);

        self.store.set(KEY_CURRENT_FILE_ID, &id)?;
        self.store
            .set(KEY_RECENT_OPEN_TIME, &self.recency.snapshot())?;

        debug!(file = %id, open_time = now, "Switched current file");
        Ok(id)
    }

    /// Switches the active repository and reopens its last file.
    ///
    /// The tree is cleared so dependents refetch it. A repository without
    /// history (or `None`) opens the blank entity.
    pub fn switch_current_repo(&mut self, repo: Option<Repository>) -> Result<FileUri> {
        self.tree = None;
        self.store.set(KEY_CURRENT_REPO, &repo)?;

        let last_file = repo
            .as_ref()
            .and_then(|r| self.recency.most_recent(&r.name));

        debug!(
            repo = repo.as_ref().map(|r| r.name.as_str()),
            restored = last_file.as_ref().map(|l| l.path.as_str()),
            "Switched current repository"
        );

        self.current_repo = repo;
        self.switch_current_file(last_file.map(FileDescriptor::from))
    }

    // ===== Entity updates =====

    /// Shallow-merges `patch` into an already opened file.
    ///
    /// Returns `false` (and changes nothing) for files never switched to.
    pub fn merge_file(&mut self, id: &FileUri, patch: EntityPatch) -> bool {
        self.opened.merge(id, patch)
    }

    /// Replaces the buffer content of an opened file and rehashes it.
    pub fn update_content(&mut self, id: &FileUri, content: &str) -> bool {
        self.opened.merge(id, EntityPatch::new().with_content(content))
    }

    /// Records a successful save: the current content becomes the saved one.
    pub fn mark_saved(&mut self, id: &FileUri) -> bool {
        let patch = {
            let entity = self.opened.get(id);
            EntityPatch::new()
                .prev_content(entity.content.clone())
                .prev_hash(entity.hash.clone())
                .saved_at(Some(self.now()))
        };
        self.opened.merge(id, patch)
    }

    // ===== UI state =====

    /// Replaces the ordered tab list.
    pub fn set_tabs(&mut self, tabs: Vec<FileUri>) -> Result<()> {
        self.store.set(KEY_TABS, &tabs)?;
        self.tabs = tabs;
        Ok(())
    }

    pub fn set_show_side(&mut self, show: bool) -> Result<()> {
        self.store.set(KEY_SHOW_SIDE, &show)?;
        self.show_side = show;
        Ok(())
    }

    pub fn set_show_view(&mut self, show: bool) -> Result<()> {
        self.store.set(KEY_SHOW_VIEW, &show)?;
        self.show_view = show;
        Ok(())
    }

    /// Not persisted.
    pub fn set_show_xterm(&mut self, show: bool) {
        self.show_xterm = show;
    }

    /// Not persisted.
    pub fn set_document_info(&mut self, info: DocumentInfo) {
        self.document_info = info;
    }

    pub fn set_repositories(&mut self, repositories: Vec<Repository>) {
        self.repositories = repositories;
    }

    pub fn set_tree(&mut self, tree: Option<TreeNode>) {
        self.tree = tree;
    }

    pub fn set_marked_files(&mut self, files: Vec<MarkedFile>) {
        self.marked_files = files;
    }

    // ===== Loaders =====

    /// Loads the repository list.
    pub fn fetch_repositories(&mut self, service: &dyn RepositoryService) -> Result<()> {
        let repositories = service.fetch_repositories()?;
        self.set_repositories(repositories);
        Ok(())
    }

    /// Loads the tree of `repo`.
    ///
    /// Without a repository this logs a warning and leaves state untouched.
    pub fn fetch_tree(
        &mut self,
        service: &dyn RepositoryService,
        repo: Option<&Repository>,
    ) -> Result<()> {
        let Some(repo) = repo else {
            warn!("No repository selected, skipping tree fetch");
            return Ok(());
        };

        let tree = service.fetch_tree(&repo.name)?;
        self.set_tree(Some(tree));
        Ok(())
    }

    /// Loads starred files, naming each after its path.
    pub fn fetch_marked_files(&mut self, service: &dyn RepositoryService) -> Result<()> {
        let files = service
            .marked_files()?
            .into_iter()
            .map(|f| MarkedFile {
                name: basename(&f.path).to_string(),
                ..f
            })
            .collect();
        self.set_marked_files(files);
        Ok(())
    }

    /// Opens a help document as the current file.
    pub fn show_help(&mut self, service: &dyn RepositoryService, doc: &str) -> Result<FileUri> {
        let content = service.fetch_help_content(doc)?;
        self.switch_current_file(Some(FileDescriptor {
            repo: HELP_REPO.to_string(),
            title: Some(doc.to_string()),
            name: doc.to_string(),
            path: format!("/{}", doc),
            content: Some(content),
        }))
    }

    fn now(&self) -> i64 {
        match &self.time_provider {
            Some(provider) => provider.now(),
            None => current_timestamp_millis(),
        }
    }
}

/// Reads the tab list, dropping entries that no longer parse.
fn load_tabs(store: &dyn KeyValueStore) -> Result<Vec<FileUri>> {
    let raw: Vec<String> = store.get(KEY_TABS, Vec::new())?;
    Ok(raw
        .into_iter()
        .filter_map(|s| match FileUri::parse(&s) {
            Ok(uri) => Some(uri),
            Err(e) => {
                warn!(tab = %s, error = %e, "Dropping unreadable tab");
                None
            }
        })
        .collect())
}

fn current_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

// Manual Debug implementation to skip the store and time provider
impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("current_repo", &self.current_repo)
            .field("current_file_id", &self.current_file_id)
            .field("opened", &self.opened.len())
            .field("recency", &self.recency.len())
            .field("tabs", &self.tabs)
            .finish_non_exhaustive()
    }
}
