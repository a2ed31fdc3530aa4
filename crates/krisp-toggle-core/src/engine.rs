//! Seam to the host's voice-settings store.
//!
//! The toggle logic never talks to the host directly; it reads and writes
//! the two noise-suppression flags through the [`MediaEngine`] trait.
//! [`SettingsStoreEngine`] is the stock implementation over the JSON
//! settings file the host client serializes.

use crate::{CoreResult, ToggleError};

use std::{
    fs,
    io::{self, Write},
    panic::Location,
    path::PathBuf,
};

use error_location::ErrorLocation;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Store key for the noise-suppression flag (host naming).
const NOISE_SUPPRESSION_KEY: &str = "noiseSuppression";
/// Store key for the noise-cancellation flag (host naming).
const NOISE_CANCELLATION_KEY: &str = "noiseCancellation";

/// Point-in-time snapshot of the two voice-settings flags.
///
/// Either flag is `None` when the store holds no boolean for it -- missing
/// key, wrong type, or the host has never written it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceFlags {
    /// The host's `noiseSuppression` flag, if readable as a boolean.
    pub noise_suppression: Option<bool>,
    /// The host's `noiseCancellation` flag, if readable as a boolean.
    pub noise_cancellation: Option<bool>,
}

/// Access to the external voice-settings store.
///
/// The store serializes its own setters; implementations only need to read
/// a snapshot and issue individual flag writes. No acknowledgement is
/// awaited for writes to take effect inside the host.
pub trait MediaEngine: Send + Sync {
    /// Read a snapshot of the two flags.
    fn voice_flags(&self) -> CoreResult<VoiceFlags>;

    /// Set the noise-suppression flag.
    fn set_noise_suppression(&self, enabled: bool) -> CoreResult<()>;

    /// Set the noise-cancellation flag.
    fn set_noise_cancellation(&self, enabled: bool) -> CoreResult<()>;
}

/// [`MediaEngine`] over the host client's JSON settings file.
///
/// Reads tolerate a missing file, non-object root, missing keys, and
/// non-boolean values (all surface as `None` flags or a store error that
/// callers classify as `Unknown`). Writes preserve unrelated keys and use
/// the write-temp-then-rename pattern so a crash mid-write cannot corrupt
/// the host's settings. A write creates the file when it is missing but
/// refuses to replace one it cannot parse.
pub struct SettingsStoreEngine {
    path: PathBuf,
}

impl SettingsStoreEngine {
    /// Create an engine over the settings file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[track_caller]
    fn read_store(&self) -> CoreResult<Map<String, Value>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ToggleError::StoreMissing {
                path: self.path.clone(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ToggleError::StoreUnavailable {
                reason: format!("Failed to read {:?}: {}", self.path, e),
                location: ErrorLocation::from(Location::caller()),
            },
        })?;

        let value: Value =
            serde_json::from_str(&contents).map_err(|e| ToggleError::StoreUnavailable {
                reason: format!("Failed to parse {:?}: {}", self.path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(ToggleError::StoreUnavailable {
                reason: format!("Store root is not an object (found {:?})", other),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Atomic write: write to temp file then rename.
    #[track_caller]
    fn write_store(&self, map: &Map<String, Value>) -> CoreResult<()> {
        let contents =
            serde_json::to_string_pretty(map).map_err(|e| ToggleError::StoreWriteFailed {
                reason: format!("Failed to serialize store: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let temp_path = self.path.with_extension("json.tmp");

        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| ToggleError::StoreWriteFailed {
                reason: format!("Failed to create {:?}: {}", temp_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file
            .write_all(contents.as_bytes())
            .and_then(|()| temp_file.sync_all())
            .map_err(|e| ToggleError::StoreWriteFailed {
                reason: format!("Failed to write {:?}: {}", temp_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        fs::rename(&temp_path, &self.path).map_err(|e| ToggleError::StoreWriteFailed {
            reason: format!("Failed to rename {:?}: {}", temp_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn set_flag(&self, key: &str, enabled: bool) -> CoreResult<()> {
        // Only a store that does not exist yet may be created from scratch.
        // Any other read failure aborts the write: the host owns this file,
        // and a corrupt or half-written store must never be replaced
        // wholesale.
        let mut map = match self.read_store() {
            Ok(map) => map,
            Err(ToggleError::StoreMissing { .. }) => {
                debug!(path = ?self.path, "Store missing, starting fresh");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        map.insert(key.to_string(), Value::Bool(enabled));
        self.write_store(&map)?;

        debug!(key, enabled, "Voice settings flag written");

        Ok(())
    }
}

impl MediaEngine for SettingsStoreEngine {
    fn voice_flags(&self) -> CoreResult<VoiceFlags> {
        let map = self.read_store()?;

        Ok(VoiceFlags {
            noise_suppression: map.get(NOISE_SUPPRESSION_KEY).and_then(Value::as_bool),
            noise_cancellation: map.get(NOISE_CANCELLATION_KEY).and_then(Value::as_bool),
        })
    }

    fn set_noise_suppression(&self, enabled: bool) -> CoreResult<()> {
        self.set_flag(NOISE_SUPPRESSION_KEY, enabled)
    }

    fn set_noise_cancellation(&self, enabled: bool) -> CoreResult<()> {
        self.set_flag(NOISE_CANCELLATION_KEY, enabled)
    }
}
