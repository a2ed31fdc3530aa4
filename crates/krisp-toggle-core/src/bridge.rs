//! Typed bridge between control surfaces and the toggle engine.
//!
//! The hotkey handler, HTTP routes, and state monitor all run on separate
//! tasks but must not race the read-then-write toggle sequence. Instead of
//! a shared global, they hold a [`BridgeHandle`] and send typed requests
//! over a channel; a single [`BridgeService`] owns the [`ToggleEngine`]
//! and serves requests one at a time.

use crate::{CoreResult, Mode, ToggleError, ToggleEngine};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument};

/// Requests served by the bridge.
#[derive(Debug)]
pub enum BridgeRequest {
    /// Toggle the feature and reply with the resulting mode.
    Toggle(oneshot::Sender<Mode>),
    /// Reply with the currently classified mode.
    GetState(oneshot::Sender<Mode>),
}

/// Clonable client side of the bridge.
#[derive(Clone)]
pub struct BridgeHandle {
    tx: mpsc::Sender<BridgeRequest>,
}

impl BridgeHandle {
    /// Toggle noise suppression, returning the resulting mode.
    pub async fn toggle(&self) -> CoreResult<Mode> {
        self.request(BridgeRequest::Toggle).await
    }

    /// Read the currently classified mode.
    pub async fn state(&self) -> CoreResult<Mode> {
        self.request(BridgeRequest::GetState).await
    }

    /// Whether the bridge service is still serving requests.
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }

    async fn request(
        &self,
        make: impl FnOnce(oneshot::Sender<Mode>) -> BridgeRequest,
    ) -> CoreResult<Mode> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| ToggleError::BridgeClosed {
                location: ErrorLocation::from(Location::caller()),
            })?;

        reply_rx.await.map_err(|_| ToggleError::BridgeClosed {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Service side of the bridge. Owns the toggle engine.
pub struct BridgeService {
    rx: mpsc::Receiver<BridgeRequest>,
    engine: ToggleEngine,
}

/// Create a connected handle/service pair around `engine`.
pub fn bridge(engine: ToggleEngine) -> (BridgeHandle, BridgeService) {
    let (tx, rx) = mpsc::channel(32);
    (BridgeHandle { tx }, BridgeService { rx, engine })
}

impl BridgeService {
    /// Serve requests until shutdown is signalled or every handle is gone.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("Bridge service started");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Bridge service shutting down");
                    break;
                }
                request = self.rx.recv() => {
                    match request {
                        Some(BridgeRequest::Toggle(reply)) => {
                            let mode = self.engine.toggle().await;
                            // A dropped reply means the caller gave up; the
                            // toggle itself already happened.
                            let _ = reply.send(mode);
                        }
                        Some(BridgeRequest::GetState(reply)) => {
                            let mode = self.engine.classify();
                            debug!(mode = %mode, "State requested");
                            let _ = reply.send(mode);
                        }
                        None => {
                            info!("All bridge handles dropped, stopping");
                            break;
                        }
                    }
                }
            }
        }

        self.engine.stop();
    }
}
