use serde::{Deserialize, Serialize};

use super::PersistedState;
use crate::storage::Storage;

/// Storage key of the display settings.
pub const SETTINGS_KEY: &str = "pvo-settings";

/// Home page display settings.
///
/// Fields missing from a persisted record take their default, so records
/// written by older versions still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_recently_added: bool,
    pub show_browsing_history: bool,
    pub homepage_section_item_count: u32,
    pub carousel_item_count: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_recently_added: true,
            show_browsing_history: true,
            homepage_section_item_count: 10,
            carousel_item_count: 5,
        }
    }
}

/// Persisted [`DisplaySettings`] with one setter per field.
#[derive(Debug)]
pub struct SettingsStore {
    state: PersistedState<DisplaySettings>,
}

impl SettingsStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            state: PersistedState::new(SETTINGS_KEY, Some(storage)),
        }
    }

    /// A copy of the current settings.
    pub fn snapshot(&self) -> DisplaySettings {
        self.state.read(Clone::clone)
    }

    pub fn show_recently_added(&self) -> bool {
        self.state.read(|s| s.show_recently_added)
    }

    pub fn show_browsing_history(&self) -> bool {
        self.state.read(|s| s.show_browsing_history)
    }

    pub fn homepage_section_item_count(&self) -> u32 {
        self.state.read(|s| s.homepage_section_item_count)
    }

    pub fn carousel_item_count(&self) -> u32 {
        self.state.read(|s| s.carousel_item_count)
    }

    pub fn set_show_recently_added(&self, value: bool) {
        self.state.update(|s| s.show_recently_added = value);
    }

    pub fn set_show_browsing_history(&self, value: bool) {
        self.state.update(|s| s.show_browsing_history = value);
    }

    pub fn set_homepage_section_item_count(&self, count: u32) {
        self.state.update(|s| s.homepage_section_item_count = count);
    }

    pub fn set_carousel_item_count(&self, count: u32) {
        self.state.update(|s| s.carousel_item_count = count);
    }
}
