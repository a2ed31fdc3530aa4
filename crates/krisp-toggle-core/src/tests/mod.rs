mod engine;
mod mode;

use crate::{CoreResult, MediaEngine, ToggleError, VoiceFlags};

use std::{
    panic::Location,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;

/// In-memory [`MediaEngine`] with failure injection for toggle and bridge
/// tests.
pub(crate) struct MockEngine {
    flags: Mutex<VoiceFlags>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockEngine {
    pub(crate) fn new(noise_suppression: Option<bool>, noise_cancellation: Option<bool>) -> Self {
        Self {
            flags: Mutex::new(VoiceFlags {
                noise_suppression,
                noise_cancellation,
            }),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn flags(&self) -> VoiceFlags {
        *self.flags.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MediaEngine for MockEngine {
    fn voice_flags(&self) -> CoreResult<VoiceFlags> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ToggleError::StoreUnavailable {
                reason: "injected read failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self.flags())
    }

    fn set_noise_suppression(&self, enabled: bool) -> CoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ToggleError::StoreWriteFailed {
                reason: "injected write failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.flags.lock().unwrap_or_else(|e| e.into_inner()).noise_suppression = Some(enabled);
        Ok(())
    }

    fn set_noise_cancellation(&self, enabled: bool) -> CoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ToggleError::StoreWriteFailed {
                reason: "injected write failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.flags.lock().unwrap_or_else(|e| e.into_inner()).noise_cancellation = Some(enabled);
        Ok(())
    }
}

/// Unique temp file path, removed on drop.
pub(crate) struct TempStore {
    pub(crate) path: PathBuf,
}

impl TempStore {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "krisp-toggle-core-test-{}-{}.json",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        Self { path }
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
