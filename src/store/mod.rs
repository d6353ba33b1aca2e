//! Client-side preference and history stores.
//!
//! Each store is an independently owned state container with a declared
//! set of actions. State is loaded from [`Storage`] when the store is
//! created and written back after every action; there is no teardown.
//! Share a store between components by wrapping it in an `Arc`.
//!
//! - [`R18ModeStore`] - whether adult-flagged items are shown
//! - [`SettingsStore`] - home page display settings
//! - [`UiStore`] - sidebar visibility, persistence optional
//! - [`HistoryStore`] - browsing history, most recent first
//!
//! # Examples
//!
//! ```rust
//! use pvo::storage::Storage;
//! use pvo::store::{R18ModeStore, SettingsStore};
//!
//! let storage = Storage::memory();
//!
//! let r18 = R18ModeStore::new(storage.clone());
//! r18.change_r18_mode(true);
//!
//! // A second instance over the same storage sees the persisted value.
//! assert!(R18ModeStore::new(storage.clone()).is_r18());
//!
//! let settings = SettingsStore::new(storage);
//! assert_eq!(settings.homepage_section_item_count(), 10);
//! ```

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};

use crate::storage::Storage;

pub mod history;
pub mod r18;
pub mod settings;
pub mod ui;

pub use history::{HistoryItem, HistoryStore};
pub use r18::R18ModeStore;
pub use settings::{DisplaySettings, SettingsStore};
pub use ui::UiStore;

/// State of one store plus where it persists.
///
/// The lock is only held inside [`read`](PersistedState::read) and
/// [`update`](PersistedState::update), never across an `.await`.
#[derive(Debug)]
pub(crate) struct PersistedState<T> {
    key: &'static str,
    state: RwLock<T>,
    storage: Option<Storage>,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Loads the state under `key`, falling back to `T::default()`.
    pub(crate) fn new(key: &'static str, storage: Option<Storage>) -> Self {
        Self::load_with(key, storage, |_| {})
    }

    /// Like [`new`](PersistedState::new), passing the loaded state through
    /// `repair` first. The repaired state is not written back until the
    /// next update.
    pub(crate) fn load_with(
        key: &'static str,
        storage: Option<Storage>,
        repair: impl FnOnce(&mut T),
    ) -> Self {
        let mut state = storage
            .as_ref()
            .and_then(|s| s.load(key))
            .unwrap_or_default();
        repair(&mut state);

        Self {
            key,
            state: RwLock::new(state),
            storage,
        }
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read())
    }

    /// Mutates the state and persists the result.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.state.write();
        let result = f(&mut state);
        if let Some(storage) = &self.storage {
            storage.save(self.key, &*state);
        }
        result
    }

    /// Restores the default state and deletes the persisted copy.
    pub(crate) fn reset(&self) {
        let mut state = self.state.write();
        if let Some(storage) = &self.storage {
            storage.remove(self.key);
        }
        *state = T::default();
    }
}
