//! File identity: the URI every other component keys on.

use crate::entity::FileDescriptor;
use crate::error::{Result, SessionError};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;

/// URI scheme prefix shared by all file identities.
pub const SCHEME: &str = "tabkeep://";

/// Repository name used by the blank entity.
pub const SYSTEM_REPO: &str = "__system__";

/// Path used by the blank entity.
pub const BLANK_PATH: &str = "/blank.md";

/// Characters left unescaped in the repository segment. `/` is escaped so the
/// first slash after the scheme always terminates the repository name.
const REPO_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Same as [`REPO_SET`] but keeps path separators readable.
const PATH_SET: &AsciiSet = &REPO_SET.remove(b'/');

/// Stable identity of a file within a repository.
///
/// Two descriptors with the same repository and path always resolve to the
/// same URI; display fields (`name`, `title`) never participate.
///
/// # Examples
///
/// ```
/// use tabkeep_core::FileUri;
///
/// let a = FileUri::new("notes", "/todo.md");
/// let b = FileUri::new("notes", "todo.md");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "tabkeep://notes/todo.md");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileUri(String);

impl FileUri {
    /// Builds the URI for a file in a repository.
    ///
    /// Paths are repository-rooted, so a single leading `/` is optional.
    pub fn new(repo: &str, path: &str) -> Self {
        let path = path.strip_prefix('/').unwrap_or(path);
        Self(format!(
            "{}{}/{}",
            SCHEME,
            utf8_percent_encode(repo, REPO_SET),
            utf8_percent_encode(path, PATH_SET)
        ))
    }

    /// The sentinel URI meaning "no file open".
    pub fn blank() -> Self {
        Self::new(SYSTEM_REPO, BLANK_PATH)
    }

    /// Resolves a descriptor to its URI; `None` yields [`FileUri::blank`].
    pub fn from_descriptor(descriptor: Option<&FileDescriptor>) -> Self {
        match descriptor {
            Some(d) => Self::new(&d.repo, &d.path),
            None => Self::blank(),
        }
    }

    /// Parses a previously produced URI string.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidUri` if the scheme is wrong, the
    /// repository segment is missing, or an escape sequence is not UTF-8.
    pub fn parse(s: &str) -> Result<Self> {
        let (repo, path) = split(s)?;
        Ok(Self::new(&repo, &path))
    }

    /// Returns the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the "no file open" sentinel.
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }

    /// Decodes the repository name and the rooted path (`/`-prefixed).
    pub fn components(&self) -> (String, String) {
        // Every FileUri is built by `new`, so decoding cannot fail.
        split(&self.0).unwrap_or_else(|_| (String::new(), String::from("/")))
    }
}

fn split(s: &str) -> Result<(String, String)> {
    let rest = s
        .strip_prefix(SCHEME)
        .ok_or_else(|| SessionError::InvalidUri(format!("missing {} scheme: {}", SCHEME, s)))?;

    let (repo, path) = rest
        .split_once('/')
        .ok_or_else(|| SessionError::InvalidUri(format!("missing path: {}", s)))?;

    if repo.is_empty() {
        return Err(SessionError::InvalidUri(format!("empty repository: {}", s)));
    }

    let decode = |part: &str| {
        percent_decode_str(part)
            .decode_utf8()
            .map(|c| c.into_owned())
            .map_err(|e| SessionError::InvalidUri(format!("{}: {}", s, e)))
    };

    Ok((decode(repo)?, format!("/{}", decode(path)?)))
}

impl fmt::Display for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileUri({})", self.0)
    }
}

impl TryFrom<String> for FileUri {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<FileUri> for String {
    fn from(uri: FileUri) -> Self {
        uri.0
    }
}

/// Canonical spelling of a repository-rooted path: exactly one leading `/`
/// is added if missing.
///
/// URIs, entities and recency entries all key on this form, so `a.md` and
/// `/a.md` name the same file everywhere.
///
/// ```
/// assert_eq!(tabkeep_core::rooted_path("a.md"), "/a.md");
/// assert_eq!(tabkeep_core::rooted_path("/a.md"), "/a.md");
/// ```
pub fn rooted_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Returns the final `/`-separated segment of a path.
///
/// ```
/// assert_eq!(tabkeep_core::basename("/docs/guide.md"), "guide.md");
/// assert_eq!(tabkeep_core::basename("plain"), "plain");
/// ```
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
