//! Browsing history: the most recently viewed items, newest first.
//!
//! Entries are identified by their `(id, type)` pair. Viewing an item that
//! is already in the history moves it to the front instead of adding a
//! second entry, and the list never grows past [`MAX_HISTORY_ITEMS`].
//!
//! ```rust
//! use pvo::storage::Storage;
//! use pvo::store::{HistoryItem, HistoryStore};
//!
//! let history = HistoryStore::new(Storage::memory());
//! history.add_item(HistoryItem::new(1, "comic"));
//! history.add_item(HistoryItem::new(2, "imageset"));
//! history.add_item(HistoryItem::new(1, "comic"));
//!
//! let recent = history.get_history(10);
//! assert_eq!(recent.len(), 2);
//! assert_eq!(recent[0], HistoryItem::new(1, "comic"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::PersistedState;
use crate::{
    storage::Storage,
    types::{ItemId, LibraryItem, ResourceKind},
};

/// Storage key of the browsing history.
pub const HISTORY_KEY: &str = "pvo-browsing-history";

/// Maximum number of entries kept.
pub const MAX_HISTORY_ITEMS: usize = 20;

/// Number of entries [`HistoryStore::recent`] returns.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One history entry: an `(id, type)` pair plus arbitrary metadata.
///
/// `id` and `type` are optional so that malformed entries can be
/// represented and rejected by [`HistoryStore::add_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// Anything the front-end wants to show without refetching
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl HistoryItem {
    pub fn new(id: impl Into<ItemId>, item_type: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            item_type: Some(item_type.into()),
            meta: Map::new(),
        }
    }

    /// Builds an entry for a library item, carrying its name, date added
    /// and R18 flag as metadata.
    pub fn from_item<I: LibraryItem>(kind: ResourceKind, item: &I) -> Self {
        Self::new(item.id().clone(), kind.history_type())
            .with_meta("name", item.name())
            .with_meta("add_date", item.add_date())
            .with_meta("is_r18", item.is_r18())
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    fn key(&self) -> Option<(&ItemId, &str)> {
        let id = self.id.as_ref().filter(|id| !id.is_blank())?;
        let item_type = self.item_type.as_deref().filter(|t| !t.is_empty())?;
        Some((id, item_type))
    }

    fn same_entry(&self, other: &HistoryItem) -> bool {
        self.id == other.id && self.item_type == other.item_type
    }
}

fn normalize(history: &mut Vec<HistoryItem>) {
    let before = history.len();
    let mut seen = HashSet::new();
    history.retain(|item| match item.key() {
        Some((id, item_type)) => seen.insert((id.clone(), item_type.to_string())),
        None => false,
    });
    history.truncate(MAX_HISTORY_ITEMS);

    if history.len() != before {
        log::warn!(
            "Dropped {} invalid or surplus history entries",
            before - history.len()
        );
    }
}

/// Persisted browsing history.
#[derive(Debug)]
pub struct HistoryStore {
    state: PersistedState<Vec<HistoryItem>>,
}

impl HistoryStore {
    /// Loads the persisted history.
    ///
    /// A stored list that breaks the history rules (entries without an id
    /// or type, repeated `(id, type)` pairs, more than
    /// [`MAX_HISTORY_ITEMS`] entries) is cleaned up, keeping the newest
    /// occurrence of each entry.
    pub fn new(storage: Storage) -> Self {
        Self {
            state: PersistedState::load_with(HISTORY_KEY, Some(storage), normalize),
        }
    }

    /// Records a view of `item`, moving an existing entry to the front.
    ///
    /// Items without an `id` or `type` are logged and ignored.
    pub fn add_item(&self, item: HistoryItem) {
        if item.key().is_none() {
            log::error!("History item must have an id and type: {:?}", item);
            return;
        }

        self.state.update(|history| {
            history.retain(|existing| !existing.same_entry(&item));
            history.insert(0, item);
            history.truncate(MAX_HISTORY_ITEMS);
        });
    }

    /// The first `limit` entries, newest first.
    pub fn get_history(&self, limit: usize) -> Vec<HistoryItem> {
        self.state
            .read(|history| history.iter().take(limit).cloned().collect())
    }

    /// The first [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn recent(&self) -> Vec<HistoryItem> {
        self.get_history(DEFAULT_HISTORY_LIMIT)
    }

    pub fn len(&self) -> usize {
        self.state.read(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the history and deletes the persisted copy.
    pub fn clear(&self) {
        self.state.reset();
    }
}
