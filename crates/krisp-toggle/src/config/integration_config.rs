use crate::config::default_enable_stream_deck;

use serde::{Deserialize, Serialize};

/// Stream Deck integration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Enable the HTTP control surface and the state file (restart needed).
    #[serde(default = "default_enable_stream_deck")]
    pub enable_stream_deck: bool,
}
