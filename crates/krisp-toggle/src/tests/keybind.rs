use crate::keybind::parse_keybind;

use global_hotkey::hotkey::{Code, Modifiers};

/// WHAT: The default keybind parses to Ctrl+Shift+K
/// WHY: This is the out-of-the-box shortcut; a regression bricks the app
#[test]
#[allow(clippy::unwrap_used)]
fn given_default_keybind_when_parsing_then_ctrl_shift_k() {
    let hotkey = parse_keybind("ctrl+shift+k").unwrap();

    assert_eq!(hotkey.mods, Modifiers::CONTROL | Modifiers::SHIFT);
    assert_eq!(hotkey.key, Code::KeyK);
}

/// WHAT: Tokens are case-insensitive and whitespace-tolerant
/// WHY: The keybind is hand-typed configuration
#[test]
#[allow(clippy::unwrap_used)]
fn given_messy_casing_when_parsing_then_normalized() {
    let hotkey = parse_keybind(" Control + ALT + Space ").unwrap();

    assert_eq!(hotkey.mods, Modifiers::CONTROL | Modifiers::ALT);
    assert_eq!(hotkey.key, Code::Space);
}

/// WHAT: Named keys and function keys resolve
/// WHY: Common non-letter bindings must round-trip through the parser
#[test]
#[allow(clippy::unwrap_used)]
fn given_named_keys_when_parsing_then_codes_match() {
    assert_eq!(parse_keybind("ctrl+f5").unwrap().key, Code::F5);
    assert_eq!(parse_keybind("alt+enter").unwrap().key, Code::Enter);
    assert_eq!(parse_keybind("cmd+8").unwrap().key, Code::Digit8);
    assert_eq!(
        parse_keybind("super+up").unwrap().mods,
        Modifiers::META
    );
}

/// WHAT: Empty strings are rejected
/// WHY: Silently registering nothing would look like a broken hotkey
#[test]
fn given_empty_string_when_parsing_then_error() {
    assert!(parse_keybind("").is_err());
    assert!(parse_keybind("  +  ").is_err());
}

/// WHAT: A bare key without modifiers is rejected
/// WHY: A global unmodified key would shadow normal typing system-wide
#[test]
fn given_no_modifier_when_parsing_then_error() {
    assert!(parse_keybind("k").is_err());
}

/// WHAT: Unknown modifiers and keys are rejected with an error
/// WHY: Typos should fail registration loudly at startup
#[test]
fn given_unknown_tokens_when_parsing_then_error() {
    assert!(parse_keybind("hyper+k").is_err());
    assert!(parse_keybind("ctrl+banana").is_err());
}
