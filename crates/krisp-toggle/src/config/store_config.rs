use serde::{Deserialize, Serialize};

use std::path::PathBuf;

/// Location of the host client's voice-settings store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the host's JSON settings file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

/// The host client keeps its settings under the user config directory.
pub(crate) fn default_store_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("discord").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}
