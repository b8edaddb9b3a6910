//! Last-open timestamps per repository file.
//!
//! Entries are keyed by `(repo, path)` rather than a joined string, and each
//! repository keeps an index ordered by timestamp so "most recent file in R"
//! is a lookup instead of a scan.

use crate::entity::LastOpened;
use crate::uri::rooted_path;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// Separator used by the legacy flat `"repo|path"` format.
pub const LEGACY_SEPARATOR: char = '|';

/// One persisted recency record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Repository name.
    pub repo: String,
    /// Repository-rooted path.
    pub path: String,
    /// Last open time (ms since epoch).
    pub time: i64,
}

/// Persisted shape of the recency map.
///
/// Older stores hold a flat object of `"repo|path": time`; both shapes are
/// accepted on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecencySnapshot {
    /// Current format.
    Entries(Vec<RecentEntry>),
    /// Legacy `"repo|path" -> time` object.
    Legacy(HashMap<String, i64>),
}

impl Default for RecencySnapshot {
    fn default() -> Self {
        Self::Entries(Vec::new())
    }
}

/// Tracks when each file was last focused.
#[derive(Debug, Clone, Default)]
pub struct RecencyTracker {
    times: HashMap<(String, String), i64>,
    by_repo: HashMap<String, BTreeSet<(i64, String)>>,
}

impl RecencyTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a tracker from its persisted form.
    pub fn from_snapshot(snapshot: RecencySnapshot) -> Self {
        match snapshot {
            RecencySnapshot::Entries(entries) => {
                let mut tracker = Self::new();
                for e in entries {
                    tracker.record(&e.repo, &e.path, e.time);
                }
                tracker
            }
            RecencySnapshot::Legacy(map) => Self::from_legacy_map(map),
        }
    }

    /// Imports the flat `"repo|path" -> time` format.
    ///
    /// Keys are split on the first separator only. Keys without a separator
    /// or with an empty path are skipped.
    pub fn from_legacy_map(map: HashMap<String, i64>) -> Self {
        let mut tracker = Self::new();
        for (key, time) in map {
            match key.split_once(LEGACY_SEPARATOR) {
                Some((repo, path)) if !repo.is_empty() && !path.is_empty() => {
                    tracker.record(repo, path, time);
                }
                _ => warn!(key = %key, "Skipping malformed recency key"),
            }
        }
        tracker
    }

    /// Converts to the persisted form, oldest entries first.
    pub fn snapshot(&self) -> RecencySnapshot {
        let mut entries: Vec<RecentEntry> = self
            .times
            .iter()
            .map(|((repo, path), time)| RecentEntry {
                repo: repo.clone(),
                path: path.clone(),
                time: *time,
            })
            .collect();
        entries.sort_by(|a, b| {
            (a.time, &a.repo, &a.path).cmp(&(b.time, &b.repo, &b.path))
        });
        RecencySnapshot::Entries(entries)
    }

    /// Records that `path` in `repo` was opened at `time`.
    ///
    /// `path` is keyed in its rooted form. A stored time never moves
    /// backwards; the effective time is returned.
    pub fn record(&mut self, repo: &str, path: &str, time: i64) -> i64 {
        let key = (repo.to_string(), rooted_path(path));
        let index = self.by_repo.entry(key.0.clone()).or_default();

        let effective = match self.times.get(&key) {
            Some(&prev) => {
                index.remove(&(prev, key.1.clone()));
                if time < prev {
                    debug!(repo, path, prev, time, "Clock went backwards, keeping previous time");
                }
                prev.max(time)
            }
            None => time,
        };

        index.insert((effective, key.1.clone()));
        self.times.insert(key, effective);
        effective
    }

    /// Last open time of a file, if recorded.
    pub fn get(&self, repo: &str, path: &str) -> Option<i64> {
        self.times
            .get(&(repo.to_string(), rooted_path(path)))
            .copied()
    }

    /// The most recently opened file in `repo`.
    ///
    /// Among exact timestamp ties the greatest path wins. Returns `None` for
    /// an empty repository name, a repository without history, or a
    /// selected entry with an empty path.
    pub fn most_recent(&self, repo: &str) -> Option<LastOpened> {
        if repo.is_empty() {
            return None;
        }

        let (_, path) = self.by_repo.get(repo)?.iter().next_back()?;
        if path.is_empty() {
            return None;
        }

        Some(LastOpened::new(repo, path.as_str()))
    }

    /// Entries of `repo`, newest first.
    pub fn entries_for(&self, repo: &str) -> Vec<RecentEntry> {
        self.by_repo
            .get(repo)
            .map(|index| {
                index
                    .iter()
                    .rev()
                    .map(|(time, path)| RecentEntry {
                        repo: repo.to_string(),
                        path: path.clone(),
                        time: *time,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Repository names with recorded history, sorted.
    pub fn repos(&self) -> Vec<&str> {
        let mut repos: Vec<&str> = self.by_repo.keys().map(String::as_str).collect();
        repos.sort_unstable();
        repos
    }

    /// Number of recorded files.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
