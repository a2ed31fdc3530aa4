//! Config file reload watcher.
//!
//! Polls the config file and reports keybind changes so the shortcut can
//! be re-registered without a restart. The watcher only detects changes;
//! registration has to happen on the main thread, so the new value travels
//! there as a [`MainEvent::UpdateKeybind`](crate::MainEvent).

use crate::{AppResult, config::Config};

use std::{fs, path::PathBuf, time::Duration};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// How often the config file is re-read for keybind changes.
pub(crate) const RELOAD_INTERVAL: Duration = Duration::from_secs(5);

/// Watches the config file for keybind changes.
pub struct ConfigWatcher {
    path: PathBuf,
    keybind: String,
}

impl ConfigWatcher {
    /// Create a watcher over the config file at `path`, seeded with the
    /// keybind currently in effect.
    pub(crate) fn new(path: PathBuf, keybind: String) -> Self {
        Self { path, keybind }
    }

    /// Re-read the config file once, returning the new keybind when it
    /// differs from the one currently in effect.
    ///
    /// Unreadable or unparseable files are skipped; the next poll retries.
    pub(crate) fn check(&mut self) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(error = %e, path = ?self.path, "Config unreadable, skipping reload");
                return None;
            }
        };

        let config: Config = match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Config unparseable, skipping reload");
                return None;
            }
        };

        if config.hotkey.keybind == self.keybind {
            return None;
        }

        self.keybind = config.hotkey.keybind;
        info!(keybind = %self.keybind, "Keybind changed in config");

        Some(self.keybind.clone())
    }

    /// Poll the config file until shutdown, reporting each keybind change
    /// through `notify`.
    #[instrument(skip(self, notify, shutdown_rx), fields(path = ?self.path))]
    pub(crate) async fn run<N>(
        mut self,
        notify: N,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> AppResult<()>
    where
        N: Fn(String),
    {
        let mut ticker = tokio::time::interval(RELOAD_INTERVAL);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Config watcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Some(keybind) = self.check() {
                        notify(keybind);
                    }
                }
            }
        }

        Ok(())
    }
}
