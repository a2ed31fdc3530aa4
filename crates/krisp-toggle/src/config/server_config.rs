use crate::config::default_port;

use serde::{Deserialize, Serialize};

/// Local HTTP control surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the loopback HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,
}
