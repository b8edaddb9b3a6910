//! Opened-file cache: URI → file-session state.

use crate::entity::{EntityPatch, FileDescriptor, FileEntity, LastOpened, BLANK_TITLE};
use crate::uri::FileUri;
use std::borrow::Cow;
use std::collections::HashMap;

/// What the cache holds for one URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenedSlot {
    /// Seeded at startup from recency data; no full entity exists yet.
    /// `None` stands for "nothing to restore".
    Placeholder(Option<LastOpened>),
    /// A materialized entity.
    Entity(FileEntity),
}

/// Entities of every file opened in this process.
///
/// Lookups never fail: a miss yields a fresh blank entity that is not
/// stored. Entries are never evicted here.
#[derive(Debug, Clone)]
pub struct OpenedFiles {
    slots: HashMap<FileUri, OpenedSlot>,
    blank_title: String,
}

impl Default for OpenedFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenedFiles {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::with_blank_title(BLANK_TITLE)
    }

    /// Creates an empty cache whose blank entities use `title`.
    pub fn with_blank_title(title: impl Into<String>) -> Self {
        Self {
            slots: HashMap::new(),
            blank_title: title.into(),
        }
    }

    /// Installs a startup placeholder under `id`.
    pub fn seed(&mut self, id: FileUri, last: Option<LastOpened>) {
        self.slots.insert(id, OpenedSlot::Placeholder(last));
    }

    /// A blank entity with this cache's title.
    pub fn blank(&self) -> FileEntity {
        FileEntity::blank_titled(&self.blank_title)
    }

    /// Looks up the entity for `id`.
    ///
    /// Placeholders are presented as entities with empty editing state;
    /// unknown ids and empty placeholders yield the blank entity.
    pub fn get(&self, id: &FileUri) -> Cow<'_, FileEntity> {
        match self.slots.get(id) {
            Some(OpenedSlot::Entity(entity)) => Cow::Borrowed(entity),
            Some(OpenedSlot::Placeholder(Some(last))) => {
                Cow::Owned(FileEntity::from_last_opened(last))
            }
            Some(OpenedSlot::Placeholder(None)) | None => Cow::Owned(self.blank()),
        }
    }

    /// Returns the raw slot for `id`.
    pub fn slot(&self, id: &FileUri) -> Option<&OpenedSlot> {
        self.slots.get(id)
    }

    /// Shallow-merges `patch` into the entity at `id`.
    ///
    /// Only known files are updated: an unknown id or an empty placeholder
    /// is left alone and `false` is returned.
    pub fn merge(&mut self, id: &FileUri, patch: EntityPatch) -> bool {
        match self.materialize(id) {
            Some(entity) => {
                entity.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Makes `descriptor` the file being shown and stamps its open time.
    ///
    /// An existing entity keeps metadata the descriptor does not carry
    /// (hashes, save time, password state). Returns the file's URI.
    pub fn set_current(&mut self, descriptor: Option<&FileDescriptor>, now: i64) -> FileUri {
        let id = FileUri::from_descriptor(descriptor);

        let mut entity = match self.slots.remove(&id) {
            Some(OpenedSlot::Entity(entity)) => entity,
            Some(OpenedSlot::Placeholder(Some(last))) => FileEntity::from_last_opened(&last),
            Some(OpenedSlot::Placeholder(None)) | None => self.blank(),
        };

        if let Some(d) = descriptor {
            entity.reseed(id.clone(), d);
        }
        entity.open_time = Some(now);

        self.slots.insert(id.clone(), OpenedSlot::Entity(entity));
        id
    }

    /// Returns true if `id` has a slot.
    pub fn contains(&self, id: &FileUri) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All cached ids, sorted.
    pub fn ids(&self) -> Vec<&FileUri> {
        let mut ids: Vec<&FileUri> = self.slots.keys().collect();
        ids.sort();
        ids
    }

    /// Materialized entities.
    pub fn entities(&self) -> impl Iterator<Item = &FileEntity> {
        self.slots.values().filter_map(|slot| match slot {
            OpenedSlot::Entity(entity) => Some(entity),
            OpenedSlot::Placeholder(_) => None,
        })
    }

    /// Upgrades a placeholder stub in place and returns the entity.
    fn materialize(&mut self, id: &FileUri) -> Option<&mut FileEntity> {
        let slot = self.slots.get_mut(id)?;
        if let OpenedSlot::Placeholder(stub) = &*slot {
            let entity = FileEntity::from_last_opened(stub.as_ref()?);
            *slot = OpenedSlot::Entity(entity);
        }
        match slot {
            OpenedSlot::Entity(entity) => Some(entity),
            OpenedSlot::Placeholder(_) => None,
        }
    }
}
