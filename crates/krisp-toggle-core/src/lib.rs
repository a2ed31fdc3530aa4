//! Krisp Toggle Core Library
//!
//! Host-independent logic for classifying and toggling the Krisp
//! noise-suppression feature: the mode classifier, the toggle engine over
//! a pluggable voice-settings store, the typed bridge channel the control
//! surfaces talk through, and optional audio cue playback.
//!
//! # Example
//!
//! ```no_run
//! use krisp_toggle_core::{bridge, SettingsStoreEngine, ToggleEngine};
//!
//! use std::{path::PathBuf, sync::Arc};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SettingsStoreEngine::new(PathBuf::from("settings.json"));
//!     let engine = ToggleEngine::new(Arc::new(store), None);
//!     let (handle, service) = bridge(engine);
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     tokio::spawn(service.run(shutdown_rx));
//!
//!     if let Ok(mode) = handle.toggle().await {
//!         println!("Now: {}", mode);
//!     }
//! }
//! ```

mod bridge;
mod engine;
mod error;
mod mode;
mod sound;
mod toggle;

pub use {
    bridge::{BridgeHandle, BridgeRequest, BridgeService, bridge},
    engine::{MediaEngine, SettingsStoreEngine, VoiceFlags},
    error::{Result as CoreResult, ToggleError},
    mode::Mode,
    sound::{Cue, SoundPlayer},
    toggle::ToggleEngine,
};

#[cfg(test)]
mod tests;
