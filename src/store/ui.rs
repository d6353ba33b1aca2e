use serde::{Deserialize, Serialize};

use super::PersistedState;
use crate::storage::Storage;

/// Storage key of the UI state, when persisted.
pub const UI_KEY: &str = "pvo-ui";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct UiState {
    side_menu_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            side_menu_visible: true,
        }
    }
}

/// Layout state. Persisted only when constructed with a [`Storage`].
#[derive(Debug)]
pub struct UiStore {
    state: PersistedState<UiState>,
}

impl UiStore {
    pub fn new(storage: Option<Storage>) -> Self {
        Self {
            state: PersistedState::new(UI_KEY, storage),
        }
    }

    pub fn is_side_menu_visible(&self) -> bool {
        self.state.read(|s| s.side_menu_visible)
    }

    /// Sets visibility to `value`, or flips it when `value` is `None`.
    pub fn toggle_side_menu(&self, value: Option<bool>) {
        self.state.update(|s| {
            s.side_menu_visible = value.unwrap_or(!s.side_menu_visible);
        });
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new(None)
    }
}
