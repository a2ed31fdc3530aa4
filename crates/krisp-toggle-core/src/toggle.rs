//! Toggle between Krisp and no suppression.
//!
//! Reads the current mode through a [`MediaEngine`], flips both flags with
//! a short defensive delay between the two writes, and tracks the last
//! mode this process set. All failures are logged and never propagate --
//! the worst case is that the user sees no change and presses again.

use crate::{Cue, MediaEngine, Mode, SoundPlayer};

use std::{sync::Arc, time::Duration};

use tracing::{debug, error, info, instrument, warn};

/// Delay between the cancellation write and the suppression write.
///
/// The store does not acknowledge writes, so this is a defensive wait for
/// the first flag to take effect inside the host before the second one
/// lands. 10ms matches what the host tolerates without dropping either.
pub(crate) const SETTER_DELAY: Duration = Duration::from_millis(10);

/// Classifies the current mode and flips between Krisp and None.
pub struct ToggleEngine {
    engine: Arc<dyn MediaEngine>,
    last_known: Mode,
    sounds: Option<SoundPlayer>,
}

impl ToggleEngine {
    /// Create a toggle engine over `engine`, with optional cue playback.
    pub fn new(engine: Arc<dyn MediaEngine>, sounds: Option<SoundPlayer>) -> Self {
        Self {
            engine,
            last_known: Mode::None,
            sounds,
        }
    }

    /// Classify the current mode from a fresh store snapshot.
    ///
    /// A store failure is an error path, not an error: it is logged and
    /// reported as [`Mode::Unknown`].
    pub fn classify(&self) -> Mode {
        match self.engine.voice_flags() {
            Ok(flags) => Mode::classify(flags.noise_suppression, flags.noise_cancellation),
            Err(e) => {
                warn!(error = %e, "Failed to read voice settings");
                Mode::Unknown
            }
        }
    }

    /// The last mode this process set via [`toggle`](Self::toggle).
    pub fn last_known(&self) -> Mode {
        self.last_known
    }

    /// Flip between Krisp and None, returning the resulting mode.
    ///
    /// Krisp and Transitioning both switch off; None and Standard switch to
    /// Krisp. Unknown is a logged no-op: with the store unreadable, blind
    /// writes could fight the host mid-update. On a setter failure the
    /// flags are left as they are and the currently observable mode is
    /// returned.
    #[instrument(skip(self))]
    pub async fn toggle(&mut self) -> Mode {
        let current = self.classify();

        if current == Mode::Unknown {
            warn!("Voice settings unreadable, toggle skipped");
            return Mode::Unknown;
        }

        let engage = !current.is_engaged();

        debug!(
            current = %current,
            last_known = %self.last_known,
            engage,
            "Toggling noise suppression"
        );

        if let Err(e) = self.engine.set_noise_cancellation(engage) {
            error!(error = %e, "Failed to set noise cancellation");
            return current;
        }

        // Let the first write settle before issuing the second.
        tokio::time::sleep(SETTER_DELAY).await;

        if let Err(e) = self.engine.set_noise_suppression(engage) {
            error!(error = %e, "Failed to set noise suppression");
            return self.classify();
        }

        self.last_known = if engage { Mode::Krisp } else { Mode::None };

        if let Some(sounds) = &self.sounds {
            sounds.play(if engage { Cue::Mute } else { Cue::Unmute });
        }

        info!(mode = %self.last_known, "Noise suppression toggled");

        self.last_known
    }

    /// Release playback resources. Called once when the bridge stops.
    pub fn stop(&mut self) {
        if let Some(sounds) = &self.sounds {
            sounds.clear();
        }
    }
}
