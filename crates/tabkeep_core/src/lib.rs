//! Tabkeep Core Library
//!
//! Editor session state for a multi-repository markdown editor, providing:
//! - Stable file URIs across repositories
//! - An opened-file cache that never fails a lookup
//! - Per-repository recency so switching back reopens the last file
//! - Write-through persistence of the session cursor
//!
//! # Quick Start
//!
//! ```
//! use tabkeep_core::{EditorSession, FileDescriptor, MemoryStore, Repository};
//!
//! let mut session = EditorSession::open(Box::new(MemoryStore::new())).unwrap();
//! assert!(session.current_file().is_blank());
//!
//! session.switch_current_repo(Some(Repository::new("notes"))).unwrap();
//! session
//!     .switch_current_file(Some(FileDescriptor::at("notes", "/todo.md")))
//!     .unwrap();
//! assert_eq!(session.current_file().name, "todo.md");
//! ```
//!
//! # Features
//!
//! ## File URIs
//!
//! Every file is identified by its repository and path:
//!
//! ```
//! use tabkeep_core::{basename, FileUri};
//!
//! let uri = FileUri::new("notes", "/dir/a.md");
//! assert_eq!(uri.as_str(), "tabkeep://notes/dir/a.md");
//! assert_eq!(FileUri::new("notes", "dir/a.md"), uri);
//! assert_eq!(basename("/dir/a.md"), "a.md");
//! ```
//!
//! ## Restoring After Restart
//!
//! The session remembers the last file of each repository:
//!
//! ```
//! use tabkeep_core::{EditorSession, FileDescriptor, MemoryStore, Repository};
//!
//! let mut session = EditorSession::open(Box::new(MemoryStore::new())).unwrap();
//! session.switch_current_repo(Some(Repository::new("notes"))).unwrap();
//! session
//!     .switch_current_file(Some(FileDescriptor::at("notes", "/a.md")))
//!     .unwrap();
//!
//! let restarted = EditorSession::open(session.into_store()).unwrap();
//! assert_eq!(restarted.current_file().path, "/a.md");
//! ```

mod cache;
mod config;
mod entity;
mod error;
mod lock;
mod recency;
mod service;
mod session;
mod store;
mod types;
mod uri;
mod workspace;

pub use cache::{OpenedFiles, OpenedSlot};
pub use config::{Config, HelpConfig, RepositoryConfig, SessionConfig, StoreConfig, CONFIG_FILE};
pub use entity::{
    content_hash, EntityPatch, FileDescriptor, FileEntity, LastOpened, BLANK_NAME, BLANK_TITLE,
};
pub use error::{Result, SessionError};
pub use lock::StoreLock;
pub use recency::{RecencySnapshot, RecencyTracker, RecentEntry, LEGACY_SEPARATOR};
pub use service::{FsRepositoryService, RepositoryService};
pub use session::{EditorSession, HELP_REPO};
pub use store::{
    KeyValueStore, MemoryStore, RedbStore, StoreExt, KEY_CURRENT_FILE_ID, KEY_CURRENT_REPO,
    KEY_RECENT_OPEN_TIME, KEY_SHOW_SIDE, KEY_SHOW_VIEW, KEY_TABS,
};
pub use types::{DocumentInfo, MarkedFile, Repository, TreeNode, TreeNodeKind};
pub use uri::{basename, rooted_path, FileUri, BLANK_PATH, SCHEME, SYSTEM_REPO};
pub use workspace::{Workspace, LOCK_FILE, STATE_DIR};

/// Time provider trait for testing.
///
/// Allows injecting controlled time into sessions so open times are
/// deterministic. Only used when explicitly set via `with_time_provider()`.
pub trait TimeProvider: Send + Sync {
    /// Returns the current Unix timestamp in milliseconds.
    fn now(&self) -> i64;
}

impl<F> TimeProvider for F
where
    F: Fn() -> i64 + Send + Sync,
{
    fn now(&self) -> i64 {
        self()
    }
}
