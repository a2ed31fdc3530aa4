use crate::ConfigWatcher;
use crate::tests::TempFile;

use std::fs;

fn config_toml(keybind: &str) -> String {
    format!(
        r#"
[hotkey]
keybind = "{keybind}"

[integration]
enable_stream_deck = true

[sound]
play_sounds = true
volume = 100

[server]
port = 37320

[store]
path = "/tmp/settings.json"
"#
    )
}

/// WHAT: An unchanged keybind is not reported
/// WHY: Every poll re-reads the file; only real changes may reach the
///      main thread
#[test]
#[allow(clippy::unwrap_used)]
fn given_unchanged_keybind_when_checking_then_none() {
    let file = TempFile::new(".toml");
    fs::write(&file.path, config_toml("ctrl+shift+k")).unwrap();
    let mut watcher = ConfigWatcher::new(file.path.clone(), "ctrl+shift+k".to_string());

    assert_eq!(watcher.check(), None);
}

/// WHAT: A changed keybind is reported exactly once
/// WHY: Re-registration is driven by edges, not by the polled value
#[test]
#[allow(clippy::unwrap_used)]
fn given_new_keybind_when_checking_then_reported_once() {
    let file = TempFile::new(".toml");
    fs::write(&file.path, config_toml("ctrl+shift+k")).unwrap();
    let mut watcher = ConfigWatcher::new(file.path.clone(), "ctrl+shift+k".to_string());

    // When: The config file is rewritten with a new keybind
    fs::write(&file.path, config_toml("ctrl+alt+m")).unwrap();

    // Then: The change is reported once and then considered current
    assert_eq!(watcher.check(), Some("ctrl+alt+m".to_string()));
    assert_eq!(watcher.check(), None);
}

/// WHAT: A missing config file is skipped
/// WHY: The file can briefly vanish during an atomic save
#[test]
fn given_missing_file_when_checking_then_none() {
    let file = TempFile::new(".toml");
    let mut watcher = ConfigWatcher::new(file.path.clone(), "ctrl+shift+k".to_string());

    assert_eq!(watcher.check(), None);
}

/// WHAT: An unparseable config is skipped and the next valid one is seen
/// WHY: Hand-edited TOML breaks; the watcher must recover on the next poll
#[test]
#[allow(clippy::unwrap_used)]
fn given_garbage_config_when_checking_then_skipped_until_valid() {
    let file = TempFile::new(".toml");
    fs::write(&file.path, "not = [valid").unwrap();
    let mut watcher = ConfigWatcher::new(file.path.clone(), "ctrl+shift+k".to_string());

    assert_eq!(watcher.check(), None);

    fs::write(&file.path, config_toml("ctrl+alt+m")).unwrap();
    assert_eq!(watcher.check(), Some("ctrl+alt+m".to_string()));
}
