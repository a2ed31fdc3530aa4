//! Global hotkey handler.
//!
//! Registers the configured keybind as a global hotkey and forwards press
//! events to the main application as toggle commands. Uses async channels
//! to communicate with the main application.

use crate::{AppCommand, AppError, AppResult, keybind};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Global hotkey handler.
pub struct HotkeyHandler {
    /// Identity of the currently registered hotkey. Shared with the main
    /// thread, which updates it when the keybind is re-registered.
    hotkey_id: Arc<AtomicU32>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Register the configured keybind as the global hotkey.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao`/`winit` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered;
    /// dropping it unregisters the shortcut.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey(keybind: &str) -> AppResult<(GlobalHotKeyManager, HotKey)> {
        let hotkey = keybind::parse_keybind(keybind)?;

        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {:?}: {}", keybind, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(keybind, "Global hotkey registered");

        Ok((manager, hotkey))
    }

    /// Swap the registered shortcut for `keybind`.
    ///
    /// Must run on the thread that registered `current`. On a registration
    /// failure the previous shortcut is re-registered so the app is never
    /// left without one.
    #[track_caller]
    #[instrument(skip(manager, current))]
    pub fn update_hotkey(
        manager: &GlobalHotKeyManager,
        current: HotKey,
        keybind: &str,
    ) -> AppResult<HotKey> {
        let new = keybind::parse_keybind(keybind)?;

        if new.id() == current.id() {
            debug!(keybind, "Keybind unchanged, nothing to re-register");
            return Ok(current);
        }

        manager
            .unregister(current)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to unregister previous hotkey: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Err(e) = manager.register(new) {
            if let Err(restore) = manager.register(current) {
                warn!(error = %restore, "Could not restore previous hotkey");
            }
            return Err(AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {:?}: {}", keybind, e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(keybind, "Global hotkey re-registered");

        Ok(new)
    }

    /// Create a handler for a previously registered hotkey.
    ///
    /// `hotkey_id` carries the identity of the registration from
    /// [`register_hotkey`](Self::register_hotkey) and is updated in place
    /// when the keybind changes. This struct is `Send` and can live on any
    /// thread -- it only listens on the global [`GlobalHotKeyEvent`] channel.
    pub fn new(hotkey_id: Arc<AtomicU32>, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            hotkey_id,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop.
    ///
    /// This method blocks until a shutdown signal is received.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Single persistent blocking task that forwards hotkey events.
        // GlobalHotKeyEvent::receiver() returns a crossbeam_channel::Receiver
        // which has blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when event_rx is dropped (loop breaks), the next
        // event_tx.blocking_send() fails, breaking the blocking loop.
        // The JoinHandle is awaited with a timeout after the main loop exits.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    // Each press also emits a release; only act on presses.
                    if event.id == self.hotkey_id.load(Ordering::SeqCst)
                        && event.state == HotKeyState::Pressed
                    {
                        self.handle_hotkey_press().await?;
                    }
                }
            }
        }

        // Drop event_rx to unblock the blocking task's next blocking_send().
        // The task will break out of its loop when blocking_send returns Err.
        drop(event_rx);

        // Best-effort join: the blocking task may be stuck in recv() if no
        // hotkey event arrives after shutdown. Use a timeout to avoid hanging.
        // The task is cleaned up by the runtime on process exit regardless.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn handle_hotkey_press(&self) -> AppResult<()> {
        debug!("Hotkey pressed");

        self.command_tx
            .send(AppCommand::Toggle)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send Toggle: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
