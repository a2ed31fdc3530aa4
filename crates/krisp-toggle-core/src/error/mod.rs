use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Toggle logic errors with source location tracking.
#[derive(Error, Debug)]
pub enum ToggleError {
    /// Voice-settings store file does not exist.
    #[error("Voice settings store missing at {path:?} {location}")]
    StoreMissing {
        /// Path where the store was expected.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Voice-settings store could not be read.
    #[error("Voice settings store unavailable: {reason} {location}")]
    StoreUnavailable {
        /// Description of why the store could not be read.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Voice-settings store could not be written.
    #[error("Voice settings store write failed: {reason} {location}")]
    StoreWriteFailed {
        /// Description of the write failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The bridge service is gone; no one is serving requests.
    #[error("Bridge disconnected {location}")]
    BridgeClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio cue could not be fetched from its remote URL.
    #[error("Cue fetch failed for {url}: {reason} {location}")]
    CueFetchFailed {
        /// URL of the cue that failed to fetch.
        url: String,
        /// Description of the fetch failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio cue bytes could not be decoded as WAV.
    #[error("Cue decode failed for {url}: {reason} {location}")]
    CueDecodeFailed {
        /// URL of the cue that failed to decode.
        url: String,
        /// Description of the decode failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio output device operation failed.
    #[error("Audio device error: {reason} {location}")]
    AudioDeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`ToggleError`].
pub type Result<T> = std::result::Result<T, ToggleError>;
