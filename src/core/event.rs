//! 输入事件：物理按键 → 和弦（Chord）
//!
//! - Chord: 按键 + 修饰键 + 阶段（按下 / 松开 / 文本输入）
//! - KeyInput: 一次物理按键产生的不可变记录
//! - AmbientEvent: 带序号的环境事件，序号即关联令牌的来源

use crate::keymap::WidgetId;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Pressed,
    Released,
    Typed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub phase: KeyPhase,
}

impl Chord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::with_phase(code, modifiers, KeyPhase::Pressed)
    }

    /// 按下/松开的和弦统一成小写字符 + SHIFT，文本输入保持原字符
    pub fn with_phase(code: KeyCode, modifiers: KeyModifiers, phase: KeyPhase) -> Self {
        let mut code = code;
        let mut modifiers = modifiers;

        if phase != KeyPhase::Typed {
            if let KeyCode::Char(ch) = code {
                if ch.is_ascii_uppercase() {
                    code = KeyCode::Char(ch.to_ascii_lowercase());
                    modifiers |= KeyModifiers::SHIFT;
                }
            }
        }

        Self {
            code,
            modifiers,
            phase,
        }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    pub fn ctrl_shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL | KeyModifiers::SHIFT)
    }

    /// 文本输入和弦不带修饰键
    pub fn typed(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::NONE,
            phase: KeyPhase::Typed,
        }
    }

    pub fn released(self) -> Self {
        Self {
            phase: KeyPhase::Released,
            ..self
        }
    }

    pub fn typed_char(&self) -> Option<char> {
        match (self.phase, self.code) {
            (KeyPhase::Typed, KeyCode::Char(ch)) => Some(ch),
            _ => None,
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ch) = self.typed_char() {
            return write!(f, "typed '{}'", ch.escape_debug());
        }

        let mods = [
            (KeyModifiers::CONTROL, "ctrl"),
            (KeyModifiers::SUPER, "cmd"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SHIFT, "shift"),
        ];
        for (flag, label) in mods {
            if self.modifiers.contains(flag) {
                write!(f, "{}+", label)?;
            }
        }

        match self.code {
            KeyCode::Char(' ') => write!(f, "space")?,
            KeyCode::Char(ch) => write!(f, "{}", ch)?,
            KeyCode::F(n) => write!(f, "f{}", n)?,
            other => write!(f, "{}", format!("{:?}", other).to_ascii_lowercase())?,
        }

        if self.phase == KeyPhase::Released {
            write!(f, " (released)")?;
        }
        Ok(())
    }
}

/// 一次物理按键。部分按键有两种合法编码，`extended_code` 记录第二种。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    pub extended_code: Option<KeyCode>,
    pub modifiers: KeyModifiers,
    pub phase: KeyPhase,
    pub source: Option<WidgetId>,
}

impl KeyInput {
    pub fn pressed(source: WidgetId, code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            extended_code: None,
            modifiers,
            phase: KeyPhase::Pressed,
            source: Some(source),
        }
    }

    pub fn released(source: WidgetId, code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            phase: KeyPhase::Released,
            ..Self::pressed(source, code, modifiers)
        }
    }

    pub fn typed(source: WidgetId, ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            extended_code: None,
            modifiers: KeyModifiers::NONE,
            phase: KeyPhase::Typed,
            source: Some(source),
        }
    }

    pub fn with_extended_code(mut self, code: KeyCode) -> Self {
        self.extended_code = Some(code);
        self
    }

    pub fn primary_chord(&self) -> Chord {
        match self.phase {
            KeyPhase::Typed => match self.code {
                KeyCode::Char(ch) => Chord::typed(ch),
                code => Chord::with_phase(code, KeyModifiers::NONE, KeyPhase::Typed),
            },
            phase => Chord::with_phase(self.code, self.modifiers, phase),
        }
    }

    /// 仅按下/松开阶段、且扩展编码与主编码不同时才有第二个和弦
    pub fn secondary_chord(&self) -> Option<Chord> {
        if self.phase == KeyPhase::Typed {
            return None;
        }
        let extended = self.extended_code?;
        if extended == self.code {
            return None;
        }
        Some(Chord::with_phase(extended, self.modifiers, self.phase))
    }

    /// 尝试顺序：扩展和弦在前，主和弦兜底
    pub fn candidate_chords(&self) -> Vec<Chord> {
        let mut chords = Vec::with_capacity(2);
        chords.extend(self.secondary_chord());
        chords.push(self.primary_chord());
        chords
    }

    pub fn typed_char(&self) -> Option<char> {
        self.primary_chord().typed_char()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyInput),
    Mouse { source: Option<WidgetId> },
    FocusGained { source: Option<WidgetId> },
    FocusLost { source: Option<WidgetId> },
}

impl InputEvent {
    pub fn is_key(&self) -> bool {
        matches!(self, InputEvent::Key(_))
    }

    pub fn as_key(&self) -> Option<&KeyInput> {
        match self {
            InputEvent::Key(e) => Some(e),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<WidgetId> {
        match self {
            InputEvent::Key(e) => e.source,
            InputEvent::Mouse { source }
            | InputEvent::FocusGained { source }
            | InputEvent::FocusLost { source } => *source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

impl EventId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ev#{}", self.0)
    }
}

/// 正在分发的原始事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbientEvent {
    pub id: EventId,
    pub event: InputEvent,
}

impl AmbientEvent {
    pub fn as_key(&self) -> Option<&KeyInput> {
        self.event.as_key()
    }
}

/// 给每个原始事件分配单调递增的编号
#[derive(Debug, Default)]
pub struct EventClock {
    next: u64,
}

impl EventClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stamp(&mut self, event: InputEvent) -> AmbientEvent {
        self.next += 1;
        AmbientEvent {
            id: EventId(self.next),
            event,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
