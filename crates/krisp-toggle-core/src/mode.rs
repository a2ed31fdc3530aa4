use serde::{Deserialize, Serialize};

use std::fmt;

/// Noise-suppression mode, derived from the host's two voice-settings flags.
///
/// The host store exposes `noiseSuppression` and `noiseCancellation` as
/// independent booleans; the four combinations map onto the first four
/// variants. Any missing or unreadable flag yields [`Mode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Krisp noise suppression active (suppression and cancellation both on).
    Krisp,
    /// Standard suppression only (suppression on, cancellation off).
    Standard,
    /// No suppression (both flags off).
    None,
    /// Cancellation on but suppression not yet applied -- the host is
    /// mid-switch toward Krisp. Treated as Krisp for toggling purposes.
    Transitioning,
    /// Flags missing or unreadable.
    Unknown,
}

impl Mode {
    /// Classify the two voice-settings flags into a mode.
    ///
    /// Either flag missing yields [`Mode::Unknown`]. The mapping is total
    /// over the four boolean combinations.
    pub fn classify(noise_suppression: Option<bool>, noise_cancellation: Option<bool>) -> Self {
        match (noise_suppression, noise_cancellation) {
            (Some(true), Some(true)) => Mode::Krisp,
            (Some(true), Some(false)) => Mode::Standard,
            (Some(false), Some(false)) => Mode::None,
            (Some(false), Some(true)) => Mode::Transitioning,
            _ => Mode::Unknown,
        }
    }

    /// Whether a toggle from this mode should switch the feature off.
    ///
    /// `Transitioning` counts as engaged: the host is already headed to
    /// Krisp, so the next toggle takes it back to `None`.
    pub fn is_engaged(self) -> bool {
        matches!(self, Mode::Krisp | Mode::Transitioning)
    }

    /// Canonical string form, as written to the state file and HTTP bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Krisp => "Krisp",
            Mode::Standard => "Standard",
            Mode::None => "None",
            Mode::Transitioning => "Transitioning",
            Mode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
