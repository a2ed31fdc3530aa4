//! Audio cue playback.
//!
//! Cues are small WAV files hosted at fixed URLs. The first playback of a
//! cue pays the fetch and decode cost; the decoded samples are then cached
//! by URL for the lifetime of the player. Playback is fire-and-forget:
//! every failure is logged and swallowed, a toggle never fails because a
//! sound did.

use crate::{CoreResult, ToggleError};

use std::{
    collections::HashMap,
    io::{Cursor, Read},
    panic::Location,
    sync::{Arc, Mutex},
    time::Duration,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use error_location::ErrorLocation;
use tracing::{debug, error, info, warn};

/// Fixed remote location of the "mute" cue (switching to Krisp).
const MUTE_CUE_URL: &str =
    "https://raw.githubusercontent.com/darkside1305/krisp-toggle/main/assets/mute.wav";
/// Fixed remote location of the "unmute" cue (switching to None).
const UNMUTE_CUE_URL: &str =
    "https://raw.githubusercontent.com/darkside1305/krisp-toggle/main/assets/unmute.wav";

/// Upper bound on fetched cue size. Cues are sub-second WAVs; anything
/// bigger is a misconfigured URL, not a cue.
const MAX_CUE_BYTES: u64 = 4 * 1024 * 1024;

/// Extra time to keep the output stream alive after the last sample,
/// covering device buffering.
const DRAIN_PAD: Duration = Duration::from_millis(50);

/// Logical audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Played when the feature switches on (toward Krisp).
    Mute,
    /// Played when the feature switches off (toward None).
    Unmute,
}

impl Cue {
    /// Fixed remote location of the cue audio.
    pub fn url(self) -> &'static str {
        match self {
            Cue::Mute => MUTE_CUE_URL,
            Cue::Unmute => UNMUTE_CUE_URL,
        }
    }
}

/// Decoded cue audio ready for playback.
struct CachedCue {
    /// Interleaved f32 samples in [-1.0, 1.0].
    samples: Arc<Vec<f32>>,
    sample_rate: u32,
    channels: u16,
}

type CueCache = Arc<Mutex<HashMap<&'static str, Arc<CachedCue>>>>;

/// Plays cues on the default output device at a configured volume.
pub struct SoundPlayer {
    /// Linear gain, scaled from the 0-100 settings value.
    volume: f32,
    cache: CueCache,
}

impl SoundPlayer {
    /// Create a player with a 0-100 volume setting (values above 100 clamp).
    pub fn new(volume: u8) -> Self {
        let volume = f32::from(volume.min(100)) / 100.0;

        info!(volume, "Sound player initialized");

        Self {
            volume,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Play a cue. Fire-and-forget: fetch, decode, and playback all happen
    /// on a blocking task and failures are logged there.
    pub fn play(&self, cue: Cue) {
        let cache = Arc::clone(&self.cache);
        let volume = self.volume;

        tokio::task::spawn_blocking(move || {
            if let Err(e) = play_cue(&cache, cue, volume) {
                warn!(cue = ?cue, error = %e, "Cue playback failed");
            }
        });
    }

    /// Drop all cached cue audio. The next playback re-fetches.
    pub fn clear(&self) {
        lock_cache(&self.cache).clear();
        debug!("Sound cache cleared");
    }
}

/// Recover from lock poison rather than losing the cache. A poisoned mutex
/// means a previous holder panicked, but the map data is still valid.
fn lock_cache(cache: &CueCache) -> std::sync::MutexGuard<'_, HashMap<&'static str, Arc<CachedCue>>> {
    cache.lock().unwrap_or_else(|e| {
        error!("Cue cache lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}

fn play_cue(cache: &CueCache, cue: Cue, volume: f32) -> CoreResult<()> {
    let url = cue.url();

    let cached = lock_cache(cache).get(url).cloned();

    let cached = match cached {
        Some(cached) => cached,
        None => {
            let bytes = fetch_cue(url)?;
            let cached = Arc::new(decode_cue(url, &bytes)?);
            lock_cache(cache).insert(url, Arc::clone(&cached));
            debug!(url, samples = cached.samples.len(), "Cue cached");
            cached
        }
    };

    play_samples(&cached, volume)
}

#[track_caller]
fn fetch_cue(url: &str) -> CoreResult<Vec<u8>> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| ToggleError::CueFetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_CUE_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| ToggleError::CueFetchFailed {
            url: url.to_string(),
            reason: format!("Failed to read body: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    debug!(url, len = bytes.len(), "Cue fetched");

    Ok(bytes)
}

#[track_caller]
fn decode_cue(url: &str, bytes: &[u8]) -> CoreResult<CachedCue> {
    let reader =
        hound::WavReader::new(Cursor::new(bytes)).map_err(|e| ToggleError::CueDecodeFailed {
            url: url.to_string(),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| ToggleError::CueDecodeFailed {
                url: url.to_string(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<Result<_, _>>()
                .map_err(|e| ToggleError::CueDecodeFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?
        }
    };

    Ok(CachedCue {
        samples: Arc::new(samples),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

/// Play decoded samples to the default output device, blocking until the
/// cue has drained.
#[track_caller]
fn play_samples(cue: &CachedCue, volume: f32) -> CoreResult<()> {
    let host = cpal::default_host();

    let device = host
        .default_output_device()
        .ok_or(ToggleError::AudioDeviceError {
            reason: "No output device found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let config = cpal::StreamConfig {
        channels: cue.channels,
        sample_rate: cue.sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    let samples = Arc::clone(&cue.samples);
    let mut pos = 0usize;

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for out in data.iter_mut() {
                    *out = samples.get(pos).copied().unwrap_or(0.0) * volume;
                    pos += 1;
                }
            },
            |err| {
                error!("Audio output stream error: {}", err);
            },
            None,
        )
        .map_err(|e| ToggleError::AudioDeviceError {
            reason: format!("Failed to build stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    stream.play().map_err(|e| ToggleError::AudioDeviceError {
        reason: format!("Failed to start stream: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // The callback pads with silence after the last sample, so sleeping for
    // the cue duration plus a small drain window is enough before dropping
    // the stream.
    let frames = cue.samples.len() as u64 / u64::from(cue.channels.max(1));
    let duration = Duration::from_micros(frames * 1_000_000 / u64::from(cue.sample_rate.max(1)));
    std::thread::sleep(duration + DRAIN_PAD);

    Ok(())
}
