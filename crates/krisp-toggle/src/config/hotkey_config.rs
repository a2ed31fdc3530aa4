use crate::config::default_keybind;

use serde::{Deserialize, Serialize};

/// Global keyboard shortcut configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Keybind to toggle Krisp (e.g. "ctrl+shift+k"). Changes to this file
    /// are picked up while running and the shortcut is re-registered.
    #[serde(default = "default_keybind")]
    pub keybind: String,
}
