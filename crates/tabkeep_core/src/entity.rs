//! File descriptors, file-session entities and partial updates.

use crate::uri::{basename, rooted_path, FileUri, BLANK_PATH, SYSTEM_REPO};
use serde::{Deserialize, Serialize};

/// Display title of the blank entity.
pub const BLANK_TITLE: &str = "No file open";

/// Display name of the blank entity.
pub const BLANK_NAME: &str = "blank.md";

/// A file as requested by the caller: which repository, which path, and
/// optionally what to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Repository name.
    pub repo: String,
    /// Display name, usually the basename of `path`.
    pub name: String,
    /// Repository-rooted path.
    pub path: String,
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional initial content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileDescriptor {
    /// Creates a descriptor without title or content.
    ///
    /// `path` is stored in its rooted form.
    pub fn new(repo: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            name: name.into(),
            path: rooted_path(&path.into()),
            title: None,
            content: None,
        }
    }

    /// Creates a descriptor whose name is derived from the path.
    pub fn at(repo: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let name = basename(&path).to_string();
        Self::new(repo, name, path)
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// The identity of the described file.
    pub fn uri(&self) -> FileUri {
        FileUri::new(&self.repo, &self.path)
    }
}

/// The file last opened in a repository, reconstructed from recency data.
///
/// This is also the shape of the placeholder seeded into the opened-file
/// cache at startup, before any full entity exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastOpened {
    /// Repository name.
    pub repo: String,
    /// Basename of `path`.
    pub name: String,
    /// Repository-rooted path.
    pub path: String,
}

impl LastOpened {
    /// Builds the record, deriving `name` from `path`.
    pub fn new(repo: impl Into<String>, path: impl Into<String>) -> Self {
        let path = rooted_path(&path.into());
        Self {
            repo: repo.into(),
            name: basename(&path).to_string(),
            path,
        }
    }

    /// Identity of the file.
    pub fn uri(&self) -> FileUri {
        FileUri::new(&self.repo, &self.path)
    }
}

impl From<LastOpened> for FileDescriptor {
    fn from(last: LastOpened) -> Self {
        FileDescriptor::new(last.repo, last.name, last.path)
    }
}

/// Editing and session state of one opened file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntity {
    /// Identity; never changes once assigned.
    pub id: FileUri,
    /// Display title.
    pub title: Option<String>,
    /// Display name.
    pub name: String,
    /// Repository-rooted path.
    pub path: String,
    /// Repository name.
    pub repo: String,
    /// Current buffer content.
    pub content: Option<String>,
    /// Hash of `content`.
    pub hash: Option<String>,
    /// Content as last saved.
    pub prev_content: Option<String>,
    /// Hash of `prev_content`.
    pub prev_hash: Option<String>,
    /// Set when the file is encryption-protected.
    pub password_hash: Option<String>,
    /// Last successful save (ms since epoch).
    pub saved_at: Option<i64>,
    /// Last focus event (ms since epoch).
    pub open_time: Option<i64>,
}

impl FileEntity {
    /// The sentinel entity shown when no file is open.
    pub fn blank() -> Self {
        Self::blank_titled(BLANK_TITLE)
    }

    /// The blank entity with a custom display title.
    pub fn blank_titled(title: &str) -> Self {
        Self {
            id: FileUri::blank(),
            title: Some(title.to_string()),
            name: BLANK_NAME.to_string(),
            path: BLANK_PATH.to_string(),
            repo: SYSTEM_REPO.to_string(),
            content: None,
            hash: None,
            prev_content: None,
            prev_hash: None,
            password_hash: None,
            saved_at: None,
            open_time: None,
        }
    }

    /// Upgrades a placeholder stub into an entity with null editing fields.
    pub fn from_last_opened(last: &LastOpened) -> Self {
        Self {
            id: last.uri(),
            title: None,
            name: last.name.clone(),
            path: last.path.clone(),
            repo: last.repo.clone(),
            content: None,
            hash: None,
            prev_content: None,
            prev_hash: None,
            password_hash: None,
            saved_at: None,
            open_time: None,
        }
    }

    /// Returns true if this is the "no file open" sentinel.
    pub fn is_blank(&self) -> bool {
        self.id.is_blank()
    }

    /// Returns true if the buffer differs from the last saved content.
    pub fn is_modified(&self) -> bool {
        self.hash != self.prev_hash
    }

    /// Returns true if the file is password protected.
    pub fn is_encrypted(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Overwrites identity and content fields from a descriptor.
    ///
    /// Hashes, save time and password state are left untouched so metadata
    /// merged earlier survives a re-switch.
    pub(crate) fn reseed(&mut self, id: FileUri, descriptor: &FileDescriptor) {
        self.id = id;
        self.name = descriptor.name.clone();
        self.path = rooted_path(&descriptor.path);
        self.repo = descriptor.repo.clone();
        self.title = descriptor.title.clone();
        self.content = descriptor.content.clone();
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: EntityPatch) {
        let EntityPatch {
            title,
            name,
            content,
            hash,
            prev_content,
            prev_hash,
            password_hash,
            saved_at,
            open_time,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = content {
            self.content = v;
        }
        if let Some(v) = hash {
            self.hash = v;
        }
        if let Some(v) = prev_content {
            self.prev_content = v;
        }
        if let Some(v) = prev_hash {
            self.prev_hash = v;
        }
        if let Some(v) = password_hash {
            self.password_hash = v;
        }
        if let Some(v) = saved_at {
            self.saved_at = v;
        }
        if let Some(v) = open_time {
            self.open_time = v;
        }
    }
}

/// A partial update to a [`FileEntity`].
///
/// The outer `Option` says whether a field is touched; for nullable fields
/// the inner value is what gets written, so `Some(None)` clears it. Identity
/// fields (`id`, `repo`, `path`) cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPatch {
    pub title: Option<Option<String>>,
    pub name: Option<String>,
    pub content: Option<Option<String>>,
    pub hash: Option<Option<String>>,
    pub prev_content: Option<Option<String>>,
    pub prev_hash: Option<Option<String>>,
    pub password_hash: Option<Option<String>>,
    pub saved_at: Option<Option<i64>>,
    pub open_time: Option<Option<i64>>,
}

impl EntityPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = Some(title);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content(mut self, content: Option<String>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn hash(mut self, hash: Option<String>) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn prev_content(mut self, content: Option<String>) -> Self {
        self.prev_content = Some(content);
        self
    }

    pub fn prev_hash(mut self, hash: Option<String>) -> Self {
        self.prev_hash = Some(hash);
        self
    }

    pub fn password_hash(mut self, hash: Option<String>) -> Self {
        self.password_hash = Some(hash);
        self
    }

    pub fn saved_at(mut self, at: Option<i64>) -> Self {
        self.saved_at = Some(at);
        self
    }

    pub fn open_time(mut self, at: Option<i64>) -> Self {
        self.open_time = Some(at);
        self
    }

    /// Sets `content` and its hash together.
    pub fn with_content(self, content: &str) -> Self {
        self.content(Some(content.to_string()))
            .hash(Some(content_hash(content)))
    }

    /// Returns true if no field is touched.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// BLAKE3 hash of file content, hex encoded.
pub fn content_hash(content: &str) -> String {
    hex::encode(blake3::hash(content.as_bytes()).as_bytes())
}
