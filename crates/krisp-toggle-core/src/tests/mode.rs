use crate::Mode;

/// WHAT: The four boolean combinations map to the four concrete modes
/// WHY: The classifier is the contract every control surface relies on
#[test]
fn given_boolean_pairs_when_classifying_then_table_matches() {
    assert_eq!(Mode::classify(Some(true), Some(true)), Mode::Krisp);
    assert_eq!(Mode::classify(Some(true), Some(false)), Mode::Standard);
    assert_eq!(Mode::classify(Some(false), Some(false)), Mode::None);
    assert_eq!(Mode::classify(Some(false), Some(true)), Mode::Transitioning);
}

/// WHAT: Any missing flag classifies as Unknown
/// WHY: Missing or non-boolean store values must never be guessed at
#[test]
fn given_missing_flags_when_classifying_then_unknown() {
    assert_eq!(Mode::classify(None, None), Mode::Unknown);
    assert_eq!(Mode::classify(Some(true), None), Mode::Unknown);
    assert_eq!(Mode::classify(None, Some(false)), Mode::Unknown);
}

/// WHAT: Only Krisp and Transitioning count as engaged
/// WHY: Transitioning must collapse to None on the next toggle
#[test]
fn given_each_mode_when_checking_engaged_then_only_krisp_and_transitioning() {
    assert!(Mode::Krisp.is_engaged());
    assert!(Mode::Transitioning.is_engaged());
    assert!(!Mode::Standard.is_engaged());
    assert!(!Mode::None.is_engaged());
    assert!(!Mode::Unknown.is_engaged());
}

/// WHAT: String forms match the five-value enumeration exactly
/// WHY: The state file and HTTP bodies are consumed by external tooling
#[test]
#[allow(clippy::unwrap_used)]
fn given_each_mode_when_formatting_then_canonical_strings() {
    let expected = [
        (Mode::Krisp, "Krisp"),
        (Mode::Standard, "Standard"),
        (Mode::None, "None"),
        (Mode::Transitioning, "Transitioning"),
        (Mode::Unknown, "Unknown"),
    ];

    for (mode, s) in expected {
        assert_eq!(mode.as_str(), s);
        assert_eq!(mode.to_string(), s);
        assert_eq!(serde_json::to_string(&mode).unwrap(), format!("\"{}\"", s));
    }
}
