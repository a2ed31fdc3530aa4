//! Configuration management for krisp-toggle.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{HotkeyConfig, IntegrationConfig, ServerConfig, SoundConfig, StoreConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use crate::config::{
    DEFAULT_ENABLE_STREAM_DECK, DEFAULT_PLAY_SOUNDS, DEFAULT_PORT, DEFAULT_SOUND_VOLUME,
    default_keybind, store_config,
};
use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Global keyboard shortcut.
    pub hotkey: HotkeyConfig,
    /// Stream Deck integration switches.
    pub integration: IntegrationConfig,
    /// Audio cue settings.
    pub sound: SoundConfig,
    /// HTTP control surface settings.
    pub server: ServerConfig,
    /// Host voice-settings store location.
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// The keybind string is NOT parsed here; that happens at hotkey
    /// registration so a bad value produces one clear startup error.
    /// The sound volume is clamped to 0-100 on load.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let mut config: Config =
                toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                    reason: format!("Failed to parse config: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            if config.sound.volume > 100 {
                warn!(
                    volume = config.sound.volume,
                    "Sound volume above 100, clamping"
                );
                config.sound.volume = 100;
            }

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Path of the config file, creating the config directory if needed.
    #[track_caller]
    pub(crate) fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "krisp-toggle", "Krisp-Toggle").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get config directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let store_path = store_config::default_store_path();

        let config = Config {
            hotkey: HotkeyConfig {
                keybind: default_keybind(),
            },
            integration: IntegrationConfig {
                enable_stream_deck: DEFAULT_ENABLE_STREAM_DECK,
            },
            sound: SoundConfig {
                play_sounds: DEFAULT_PLAY_SOUNDS,
                volume: DEFAULT_SOUND_VOLUME,
            },
            server: ServerConfig { port: DEFAULT_PORT },
            store: StoreConfig {
                path: store_path.clone(),
            },
        };

        config.save()?;

        if !store_path.exists() {
            warn!(
                store_path = ?store_path,
                "Default config created but the host settings store was not \
                 found. Adjust store.path in the config if the host client \
                 is installed elsewhere."
            );
        }

        Ok(config)
    }
}
