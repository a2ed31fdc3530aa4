mod config_watcher;
mod keybind;

use std::{
    path::PathBuf,
    sync::Arc,
    sync::atomic::{AtomicUsize, Ordering},
};

use krisp_toggle_core::{BridgeHandle, SettingsStoreEngine, ToggleEngine, bridge};
use tokio::sync::watch;

/// Unique temp file path, removed on drop.
pub(crate) struct TempFile {
    pub(crate) path: PathBuf,
}

impl TempFile {
    pub(crate) fn new(suffix: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "krisp-toggle-test-{}-{}{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst),
            suffix
        ));
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A running bridge over a JSON settings store, plus the pieces a test
/// needs to drive and tear it down.
pub(crate) struct TestBridge {
    pub(crate) handle: BridgeHandle,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) task: tokio::task::JoinHandle<()>,
    pub(crate) store: TempFile,
}

/// Spawn a bridge service over a store seeded with `contents` (empty means
/// no store file, i.e. an Unknown-state host).
#[allow(clippy::unwrap_used)]
pub(crate) fn spawn_test_bridge(contents: &str) -> TestBridge {
    let store = TempFile::new(".json");
    if !contents.is_empty() {
        std::fs::write(&store.path, contents).unwrap();
    }

    let engine = ToggleEngine::new(
        Arc::new(SettingsStoreEngine::new(store.path.clone())),
        None,
    );
    let (handle, service) = bridge(engine);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(service.run(shutdown_rx));

    TestBridge {
        handle,
        shutdown_tx,
        task,
        store,
    }
}
