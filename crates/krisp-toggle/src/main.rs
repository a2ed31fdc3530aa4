//! Krisp Toggle: global-hotkey and Stream Deck control for the host's
//! Krisp noise suppression, working even when the host is not focused.

mod app;
mod app_command;
mod config;
mod config_watcher;
mod error;
mod hotkey_handler;
mod http_server;
mod keybind;
mod state_monitor;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::{AppCommand, MainEvent},
    config_watcher::ConfigWatcher,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    http_server::HttpContext,
    state_monitor::StateMonitor,
};

use crate::config::Config;

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};
use krisp_toggle_core::{SettingsStoreEngine, SoundPlayer, ToggleEngine, bridge};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("krisp_toggle=debug")
        .init();

    let event_loop = EventLoopBuilder::<MainEvent>::with_user_event().build();
    let exit_proxy = event_loop.create_proxy();

    // Persists across event loop iterations -- dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut current_hotkey: Option<HotKey> = None;
    // Shared with the hotkey handler so re-registration retargets its filter.
    let hotkey_id = Arc::new(AtomicU32::new(0));

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(MainEvent::Exit) => {
                *control_flow = ControlFlow::ExitWithCode(0);
                return;
            }
            Event::UserEvent(MainEvent::UpdateKeybind(keybind)) => {
                // Re-registration must happen here: the manager lives on the
                // main thread with the message pump.
                if let (Some(manager), Some(current)) =
                    (hotkey_manager.as_ref(), current_hotkey)
                {
                    match HotkeyHandler::update_hotkey(manager, current, &keybind) {
                        Ok(hotkey) => {
                            current_hotkey = Some(hotkey);
                            hotkey_id.store(hotkey.id(), Ordering::SeqCst);
                        }
                        Err(e) => {
                            error!(error = ?e, "Keybind update failed, keeping previous");
                        }
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                // Register hotkey on the main thread -- tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                // hotkey_manager is stored in the closure's captured state so it
                // lives for the entire app lifetime.
                let (manager, hotkey) =
                    match HotkeyHandler::register_hotkey(&config.hotkey.keybind) {
                        Ok(pair) => pair,
                        Err(e) => {
                            error!("Failed to register hotkey: {:?}", e);
                            std::process::exit(1);
                        }
                    };
                hotkey_manager = Some(manager);
                current_hotkey = Some(hotkey);
                hotkey_id.store(hotkey.id(), Ordering::SeqCst);

                let exit_proxy = exit_proxy.clone();
                let handler_id = Arc::clone(&hotkey_id);

                // Spawn tokio runtime on separate thread.
                // hotkey_manager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async move {
                        let store = SettingsStoreEngine::new(config.store.path.clone());
                        let sounds = config
                            .sound
                            .play_sounds
                            .then(|| SoundPlayer::new(config.sound.volume));
                        let toggle_engine = ToggleEngine::new(Arc::new(store), sounds);
                        let (bridge_handle, bridge_service) = bridge(toggle_engine);

                        let (command_tx, command_rx) = mpsc::channel(32);
                        let (shutdown_tx, shutdown_rx) = watch::channel(false);

                        let hotkey_handler = HotkeyHandler::new(handler_id, command_tx.clone());

                        // Ctrl-C requests shutdown through the command channel.
                        {
                            let command_tx = command_tx.clone();
                            tokio::spawn(async move {
                                if tokio::signal::ctrl_c().await.is_ok() {
                                    let _ = command_tx.send(AppCommand::Shutdown).await;
                                }
                            });
                        }

                        // Keybind changes in the config file re-register the
                        // shortcut without a restart.
                        match Config::config_path() {
                            Ok(config_path) => {
                                let watcher = ConfigWatcher::new(
                                    config_path,
                                    config.hotkey.keybind.clone(),
                                );
                                let keybind_proxy = exit_proxy.clone();
                                let watcher_shutdown = shutdown_rx.clone();
                                tokio::spawn(async move {
                                    let notify = move |keybind| {
                                        if keybind_proxy
                                            .send_event(MainEvent::UpdateKeybind(keybind))
                                            .is_err()
                                        {
                                            warn!("Main event loop gone, keybind update dropped");
                                        }
                                    };
                                    if let Err(e) = watcher.run(notify, watcher_shutdown).await {
                                        error!(error = ?e, "Config watcher error");
                                    }
                                });
                            }
                            Err(e) => {
                                warn!(error = ?e, "Config path unavailable, keybind reload disabled");
                            }
                        }

                        if config.integration.enable_stream_deck {
                            let ctx =
                                HttpContext::new(bridge_handle.clone(), config.server.port);
                            let server_shutdown = shutdown_rx.clone();
                            tokio::spawn(async move {
                                if let Err(e) = http_server::serve(ctx, server_shutdown).await {
                                    error!(error = ?e, "HTTP control surface error");
                                }
                            });

                            let monitor = StateMonitor::new(bridge_handle.clone());
                            info!(
                                port = config.server.port,
                                state_file = ?monitor.path(),
                                "Stream Deck integration enabled"
                            );
                            let monitor_shutdown = shutdown_rx.clone();
                            tokio::spawn(async move {
                                if let Err(e) = monitor.run(monitor_shutdown).await {
                                    error!(error = ?e, "State monitor error");
                                }
                            });
                        } else {
                            info!("Stream Deck integration disabled");
                        }

                        let app = App {
                            bridge: bridge_handle,
                            command_rx,
                            shutdown_tx,
                            exit_proxy,
                        };

                        tokio::join!(
                            bridge_service.run(shutdown_rx.clone()),
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx.clone()).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error")
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
