use crate::tests::TempStore;
use crate::{MediaEngine, Mode, SettingsStoreEngine};

use std::fs;

/// WHAT: Reading a missing store file is an error
/// WHY: Callers classify store failures as Unknown instead of guessing
#[test]
fn given_missing_file_when_reading_flags_then_error() {
    let store = TempStore::new();
    let engine = SettingsStoreEngine::new(store.path.clone());

    assert!(engine.voice_flags().is_err());
}

/// WHAT: Boolean flags present in the store are read back
/// WHY: The classifier input comes straight from these reads
#[test]
#[allow(clippy::unwrap_used)]
fn given_both_flags_true_when_reading_then_both_some_true() {
    let store = TempStore::new();
    fs::write(
        &store.path,
        r#"{"noiseSuppression": true, "noiseCancellation": true}"#,
    )
    .unwrap();
    let engine = SettingsStoreEngine::new(store.path.clone());

    let flags = engine.voice_flags().unwrap();

    assert_eq!(flags.noise_suppression, Some(true));
    assert_eq!(flags.noise_cancellation, Some(true));
    assert_eq!(
        Mode::classify(flags.noise_suppression, flags.noise_cancellation),
        Mode::Krisp
    );
}

/// WHAT: Non-boolean and missing values read as None
/// WHY: The host may hold any JSON there; the policy is Unknown, not panic
#[test]
#[allow(clippy::unwrap_used)]
fn given_non_boolean_values_when_reading_then_flags_are_none() {
    let store = TempStore::new();
    fs::write(&store.path, r#"{"noiseSuppression": "yes"}"#).unwrap();
    let engine = SettingsStoreEngine::new(store.path.clone());

    let flags = engine.voice_flags().unwrap();

    assert_eq!(flags.noise_suppression, None);
    assert_eq!(flags.noise_cancellation, None);
    assert_eq!(
        Mode::classify(flags.noise_suppression, flags.noise_cancellation),
        Mode::Unknown
    );
}

/// WHAT: Setting a flag creates the store file when missing
/// WHY: First run may happen before the host ever wrote its settings
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_setting_flag_then_store_created() {
    let store = TempStore::new();
    let engine = SettingsStoreEngine::new(store.path.clone());

    engine.set_noise_cancellation(true).unwrap();

    let flags = engine.voice_flags().unwrap();
    assert_eq!(flags.noise_cancellation, Some(true));
    assert_eq!(flags.noise_suppression, None);
}

/// WHAT: A corrupt store aborts the write and is left untouched
/// WHY: The host writes this file non-atomically; a half-written read must
///      never race a flag write into wiping the user's other settings
#[test]
#[allow(clippy::unwrap_used)]
fn given_corrupt_store_when_setting_flag_then_error_and_file_untouched() {
    let store = TempStore::new();
    let truncated = r#"{"theme": "dark", "locale": "en-US", "noiseSup"#;
    fs::write(&store.path, truncated).unwrap();
    let engine = SettingsStoreEngine::new(store.path.clone());

    assert!(engine.set_noise_cancellation(true).is_err());

    assert_eq!(fs::read_to_string(&store.path).unwrap(), truncated);
}

/// WHAT: Setting a flag preserves unrelated store keys
/// WHY: The settings file belongs to the host; only our two keys may change
#[test]
#[allow(clippy::unwrap_used)]
fn given_other_keys_when_setting_flag_then_they_survive() {
    let store = TempStore::new();
    fs::write(
        &store.path,
        r#"{"theme": "dark", "noiseSuppression": false}"#,
    )
    .unwrap();
    let engine = SettingsStoreEngine::new(store.path.clone());

    engine.set_noise_suppression(true).unwrap();

    let contents = fs::read_to_string(&store.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["theme"], "dark");
    assert_eq!(value["noiseSuppression"], true);
}
