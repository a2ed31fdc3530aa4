//! State file monitoring for Stream Deck integration.
//!
//! Polls the bridge on a fixed interval and mirrors the current mode into
//! a text file in the OS temp directory. Deck software watches that file
//! instead of hitting the HTTP surface every frame. The file is rewritten
//! only when the mode actually changed.

use crate::AppResult;

use std::{fs, path::PathBuf, time::Duration};

use krisp_toggle_core::{BridgeHandle, Mode};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// How often the bridge is asked for the current mode.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Fixed state file name inside the OS temp directory.
pub(crate) const STATE_FILE_NAME: &str = "krisp-toggle-state.txt";

/// Mirrors the current mode into the state file.
pub struct StateMonitor {
    bridge: BridgeHandle,
    path: PathBuf,
    last_written: Option<Mode>,
}

impl StateMonitor {
    /// Create a monitor writing to the default temp-directory state file.
    pub fn new(bridge: BridgeHandle) -> Self {
        Self::with_path(bridge, std::env::temp_dir().join(STATE_FILE_NAME))
    }

    /// Create a monitor writing to `path`.
    pub(crate) fn with_path(bridge: BridgeHandle, path: PathBuf) -> Self {
        Self {
            bridge,
            path,
            last_written: None,
        }
    }

    /// Path of the state file this monitor writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Run the poll loop until shutdown is signalled.
    #[instrument(skip(self, shutdown_rx), fields(path = ?self.path))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        // Seed the file so deck software sees a value before the first poll.
        self.write_state(Mode::Unknown);

        let mut ticker = tokio::time::interval(POLL_INTERVAL);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("State monitor shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let mode = self.bridge.state().await.unwrap_or(Mode::Unknown);
                    self.write_state(mode);
                }
            }
        }

        Ok(())
    }

    /// Write `mode` to the state file if it differs from the last write.
    /// Returns whether the file was touched. Write failures are logged and
    /// swallowed; the next poll retries.
    pub(crate) fn write_state(&mut self, mode: Mode) -> bool {
        if self.last_written == Some(mode) {
            return false;
        }

        match fs::write(&self.path, mode.as_str()) {
            Ok(()) => {
                debug!(mode = %mode, path = ?self.path, "State file updated");
                self.last_written = Some(mode);
                true
            }
            Err(e) => {
                warn!(error = %e, path = ?self.path, "Failed to write state file");
                false
            }
        }
    }
}
