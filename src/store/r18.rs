use serde::{Deserialize, Serialize};

use super::PersistedState;
use crate::storage::Storage;

/// Storage key of the R18 toggle.
pub const R18_MODE_KEY: &str = "pvo-r18-mode";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct R18Mode {
    is_r18: bool,
}

/// Global toggle deciding whether adult-flagged items appear in library
/// views. Off by default.
#[derive(Debug)]
pub struct R18ModeStore {
    state: PersistedState<R18Mode>,
}

impl R18ModeStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            state: PersistedState::new(R18_MODE_KEY, Some(storage)),
        }
    }

    /// A toggle that lives only for this process.
    pub fn ephemeral() -> Self {
        Self {
            state: PersistedState::new(R18_MODE_KEY, None),
        }
    }

    pub fn is_r18(&self) -> bool {
        self.state.read(|s| s.is_r18)
    }

    pub fn change_r18_mode(&self, value: bool) {
        self.state.update(|s| s.is_r18 = value);
    }
}
