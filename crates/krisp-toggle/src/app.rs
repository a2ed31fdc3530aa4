use crate::{AppCommand, AppResult, MainEvent};

use krisp_toggle_core::BridgeHandle;
use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument};

/// Main application state.
///
/// Runs on the async runtime thread. Owns the command channel that the
/// hotkey handler and the Ctrl-C task feed; everything it does to the
/// toggle state goes through the bridge.
pub struct App {
    pub(crate) bridge: BridgeHandle,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    /// Wakes the tao event loop on the main thread so the process exits.
    pub(crate) exit_proxy: EventLoopProxy<MainEvent>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Krisp Toggle starting");

        loop {
            match self.command_rx.recv().await {
                Some(AppCommand::Toggle) => {
                    // Failures are logged, never propagated. The user sees
                    // no change and presses again.
                    match self.bridge.toggle().await {
                        Ok(mode) => info!(mode = %mode, "Toggle complete"),
                        Err(e) => error!(error = %e, "Toggle failed"),
                    }
                }
                Some(AppCommand::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                None => {
                    info!("All command senders closed, shutting down");
                    break;
                }
            }
        }

        let _ = self.shutdown_tx.send(true);

        if self.exit_proxy.send_event(MainEvent::Exit).is_err() {
            error!("Main event loop already gone");
        }

        info!("Krisp Toggle shut down successfully");

        Ok(())
    }
}
