use crate::config::{default_play_sounds, default_sound_volume};

use serde::{Deserialize, Serialize};

/// Audio cue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Play a cue when the feature toggles.
    #[serde(default = "default_play_sounds")]
    pub play_sounds: bool,
    /// Cue volume, 0-100. Values above 100 are clamped on load.
    #[serde(default = "default_sound_volume")]
    pub volume: u8,
}
