//! 各平台的撤销 / 重做 / 纯文本粘贴 / 右键菜单快捷键，第一个和弦用于显示

use crate::core::Chord;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    #[serde(alias = "macos")]
    Mac,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformShortcuts {
    undo: Vec<Chord>,
    redo: Vec<Chord>,
    paste_plain: Vec<Chord>,
    context_menu: Vec<Chord>,
}

impl PlatformShortcuts {
    pub fn for_platform(platform: Platform) -> Self {
        let z = KeyCode::Char('z');
        let y = KeyCode::Char('y');
        let v = KeyCode::Char('v');
        let cmd = KeyModifiers::SUPER;
        let cmd_shift = KeyModifiers::SUPER | KeyModifiers::SHIFT;
        // 根窗格的 postPopup 键，各平台相同
        let context_menu = vec![Chord::shift(KeyCode::F(10)), Chord::simple(KeyCode::Menu)];

        match platform {
            Platform::Windows => Self {
                undo: vec![Chord::ctrl(z), Chord::alt(KeyCode::Backspace)],
                redo: vec![Chord::ctrl(y), Chord::ctrl_shift(z)],
                paste_plain: vec![Chord::ctrl_shift(v)],
                context_menu,
            },
            Platform::Linux => Self {
                undo: vec![Chord::ctrl(z)],
                redo: vec![Chord::ctrl_shift(z), Chord::ctrl(y)],
                paste_plain: vec![Chord::ctrl_shift(v)],
                context_menu,
            },
            Platform::Mac => Self {
                undo: vec![Chord::new(z, cmd)],
                redo: vec![Chord::new(z, cmd_shift), Chord::new(y, cmd)],
                paste_plain: vec![Chord::new(v, cmd_shift | KeyModifiers::ALT)],
                context_menu,
            },
        }
    }

    pub fn undo(&self) -> &[Chord] {
        &self.undo
    }

    pub fn redo(&self) -> &[Chord] {
        &self.redo
    }

    pub fn paste_plain(&self) -> &[Chord] {
        &self.paste_plain
    }

    pub fn context_menu(&self) -> &[Chord] {
        &self.context_menu
    }

    pub fn undo_display(&self) -> Option<&Chord> {
        self.undo.first()
    }

    pub fn redo_display(&self) -> Option<&Chord> {
        self.redo.first()
    }

    pub fn paste_plain_display(&self) -> Option<&Chord> {
        self.paste_plain.first()
    }
}

impl Default for PlatformShortcuts {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}
