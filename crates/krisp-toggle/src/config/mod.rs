mod config;
mod hotkey_config;
mod integration_config;
mod server_config;
mod sound_config;
mod store_config;

pub(crate) use {
    config::Config, hotkey_config::HotkeyConfig, integration_config::IntegrationConfig,
    server_config::ServerConfig, sound_config::SoundConfig, store_config::StoreConfig,
};

pub(crate) const DEFAULT_KEYBIND: &str = "ctrl+shift+k";
pub(crate) const DEFAULT_ENABLE_STREAM_DECK: bool = true;
pub(crate) const DEFAULT_PLAY_SOUNDS: bool = true;
pub(crate) const DEFAULT_SOUND_VOLUME: u8 = 100;
pub(crate) const DEFAULT_PORT: u16 = 37320;

pub(crate) fn default_keybind() -> String {
    DEFAULT_KEYBIND.to_string()
}

pub(crate) fn default_enable_stream_deck() -> bool {
    DEFAULT_ENABLE_STREAM_DECK
}

pub(crate) fn default_play_sounds() -> bool {
    DEFAULT_PLAY_SOUNDS
}

pub(crate) fn default_sound_volume() -> u8 {
    DEFAULT_SOUND_VOLUME
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}
