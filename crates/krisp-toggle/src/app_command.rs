/// Commands sent from the hotkey handler and signal tasks to the app.
#[derive(Debug, Clone, Copy)]
pub enum AppCommand {
    /// Toggle noise suppression through the bridge.
    Toggle,
    /// Request application shutdown.
    Shutdown,
}

/// Events delivered to the tao event loop on the main thread.
#[derive(Debug)]
pub enum MainEvent {
    /// Re-register the global hotkey with a new keybind.
    UpdateKeybind(String),
    /// Exit the process.
    Exit,
}
