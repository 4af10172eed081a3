//! 和弦文本："ctrl+shift+z"、"backspace"、"f5"、"Z"（大写字母隐含 shift）

use super::error::ConfigError;
use crate::core::Chord;
use crossterm::event::{KeyCode, KeyModifiers};

pub fn parse_chord(value: &str) -> Result<Chord, ConfigError> {
    let invalid = || ConfigError::InvalidChord(value.to_string());

    let mut modifiers = KeyModifiers::NONE;
    let mut key_part: Option<&str> = None;
    for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "super" | "meta" | "cmd" | "command" => modifiers |= KeyModifiers::SUPER,
            _ => {
                if key_part.is_some() {
                    return Err(invalid());
                }
                key_part = Some(part);
            }
        }
    }

    let code = key_part.and_then(parse_key_code).ok_or_else(invalid)?;
    Ok(Chord::new(code, modifiers))
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    let v_lc = v.to_ascii_lowercase();
    let code = match v_lc.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" | "back_space" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        "menu" | "context_menu" => KeyCode::Menu,
        _ => {
            if let Some(n) = v_lc.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return Some(KeyCode::F(n));
            }
            let mut chars = v.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(code)
}
