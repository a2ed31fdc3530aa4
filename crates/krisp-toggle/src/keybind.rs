//! Keybind string parsing.
//!
//! Turns user-facing strings like "ctrl+shift+k" into the accelerator form
//! the hotkey backend expects. Tokens are case-insensitive; every token
//! before the last must be a modifier and the last must be a key.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};

/// Parse a "ctrl+shift+k"-style keybind into a [`HotKey`].
///
/// At least one modifier is required: a bare key would shadow normal
/// typing system-wide.
#[track_caller]
pub(crate) fn parse_keybind(keybind: &str) -> AppResult<HotKey> {
    let location = ErrorLocation::from(Location::caller());

    let tokens: Vec<&str> = keybind
        .split('+')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let (key_token, modifier_tokens) = match tokens.split_last() {
        Some(pair) => pair,
        None => {
            return Err(AppError::InvalidKeybind {
                keybind: keybind.to_string(),
                reason: "Keybind cannot be empty".to_string(),
                location,
            });
        }
    };

    if modifier_tokens.is_empty() {
        return Err(AppError::InvalidKeybind {
            keybind: keybind.to_string(),
            reason: "At least one modifier is required (e.g. ctrl, shift, alt)".to_string(),
            location,
        });
    }

    let mut mods = Modifiers::empty();
    for token in modifier_tokens {
        mods |= match modifier(token) {
            Some(m) => m,
            None => {
                return Err(AppError::InvalidKeybind {
                    keybind: keybind.to_string(),
                    reason: format!("Unknown modifier: {:?}", token),
                    location,
                });
            }
        };
    }

    let code = match key_code(key_token) {
        Some(code) => code,
        None => {
            return Err(AppError::InvalidKeybind {
                keybind: keybind.to_string(),
                reason: format!("Unknown key: {:?}", key_token),
                location,
            });
        }
    };

    Ok(HotKey::new(Some(mods), code))
}

fn modifier(token: &str) -> Option<Modifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifiers::CONTROL),
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "option" => Some(Modifiers::ALT),
        "cmd" | "command" | "meta" | "super" => Some(Modifiers::META),
        _ => None,
    }
}

fn key_code(token: &str) -> Option<Code> {
    let token = token.to_ascii_lowercase();

    let code = match token.as_str() {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" | "return" => Code::Enter,
        "tab" => Code::Tab,
        "escape" | "esc" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" => Code::Delete,
        "insert" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "comma" => Code::Comma,
        "period" => Code::Period,
        "slash" => Code::Slash,
        "semicolon" => Code::Semicolon,
        "minus" => Code::Minus,
        "equal" | "equals" => Code::Equal,
        "backquote" | "grave" => Code::Backquote,
        _ => return None,
    };

    Some(code)
}
