//! Error types for tabkeep_core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for session operations.
///
/// Lookups never produce errors (a miss degrades to the blank entity), so
/// these variants cover the edges of the system: the persisted store, the
/// repository service and configuration.
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persistent key-value store rejected an operation.
    #[error("store error: {0}")]
    Store(String),

    /// A value could not be encoded for the store.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A string could not be parsed as a file URI.
    #[error("invalid file URI: {0}")]
    InvalidUri(String),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The repository service does not know the named repository.
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// A help document does not exist.
    #[error("help document not found: {0}")]
    HelpNotFound(String),

    /// The repository service failed while loading data.
    #[error("failed to load {what}: {reason}")]
    LoadFailed {
        /// What was being loaded (tree, repositories, ...)
        what: String,
        /// Description of the failure
        reason: String,
    },

    /// The state directory has not been initialized.
    #[error("not a tabkeep directory: {}", .0.display())]
    NotInitialized(PathBuf),

    /// The state directory is already initialized.
    #[error("tabkeep directory already exists: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The store is locked by another process.
    #[error("session store locked by another process")]
    StoreLocked,

    /// The store lock is held by a live process.
    #[error("session store lock held by another process (PID: {pid})")]
    StoreLockHeld {
        /// Process ID holding the lock
        pid: u32,
    },
}

impl SessionError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized(_) => Some("Run 'tabkeep init' to create the state directory."),
            Self::AlreadyInitialized(_) => {
                Some("The directory is already set up. Use 'tabkeep status' to inspect it.")
            }
            Self::StoreLockHeld { .. } => {
                Some("Another tabkeep process is running. Wait for it to finish and retry.")
            }
            Self::StoreLocked => Some(
                "Another process is using the session store. Wait for it to finish and retry.",
            ),
            Self::RepositoryNotFound(_) => {
                Some("Add the repository to .tabkeep/config.toml under [[repositories]].")
            }
            Self::ConfigError(_) => Some("Check .tabkeep/config.toml for syntax errors."),
            Self::Store(_) => Some(
                "The session store might be corrupted. Delete .tabkeep/session.redb to reset it.",
            ),
            _ => None,
        }
    }
}

/// Convenience Result type for tabkeep_core operations.
pub type Result<T> = std::result::Result<T, SessionError>;
