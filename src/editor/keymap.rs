//! 文本框的默认键位
//!
//! 可打印字符走按键表的兜底绑定 `default-action`，
//! 它的处理器自称 `default-typed`（绑定键与处理器名不同）。

use crate::config::PlatformShortcuts;
use crate::core::{Chord, Command};
use crate::keymap::{BindingKey, BindingTable, HandlerRegistry, Tier};
use crossterm::event::KeyCode;

pub const DEFAULT_ACTION: &str = "default-action";

/// 默认键位，处理器注册到 `handlers`
pub fn field_bindings(handlers: &mut HandlerRegistry) -> BindingTable {
    let mut table = BindingTable::new();

    let typed = handlers.register(Command::DefaultTyped);
    table
        .tier_mut(Tier::Focused)
        .set_typed_fallback(Some(BindingKey::from(DEFAULT_ACTION)));
    table.actions_mut().put(DEFAULT_ACTION, typed);

    let defaults = [
        // ==================== 编辑操作 ====================
        (Chord::simple(KeyCode::Backspace), Command::DeletePrevious),
        (Chord::shift(KeyCode::Backspace), Command::DeletePrevious),
        (Chord::simple(KeyCode::Delete), Command::DeleteNext),
        (Chord::simple(KeyCode::Enter), Command::InsertBreak),
        (Chord::simple(KeyCode::Tab), Command::InsertTab),
        // ==================== 光标移动 ====================
        (Chord::simple(KeyCode::Right), Command::CaretForward),
        (Chord::simple(KeyCode::Left), Command::CaretBackward),
        (Chord::simple(KeyCode::Home), Command::CaretBegin),
        (Chord::simple(KeyCode::End), Command::CaretEnd),
        // ==================== 选择操作 ====================
        (Chord::shift(KeyCode::Right), Command::SelectionForward),
        (Chord::shift(KeyCode::Left), Command::SelectionBackward),
        (Chord::ctrl(KeyCode::Char('a')), Command::SelectAll),
        (Chord::ctrl(KeyCode::Char('\\')), Command::Unselect),
    ];

    for (chord, command) in defaults {
        let key = BindingKey::new(command.name());
        // 同一命令的多个和弦共用一个处理器
        let handler = match table.actions().get(&key) {
            Some(handler) => handler,
            None => handlers.register(command),
        };
        table.bind(Tier::Focused, chord, key, handler);
    }

    table
}

/// 按平台装上撤销 / 重做快捷键
pub fn install_history_shortcuts(
    table: &mut BindingTable,
    handlers: &mut HandlerRegistry,
    shortcuts: &PlatformShortcuts,
) {
    let undo = handlers.register(Command::Undo);
    let redo = handlers.register(Command::Redo);
    for chord in shortcuts.undo() {
        table.bind(Tier::Focused, *chord, Command::Undo.name(), undo);
    }
    for chord in shortcuts.redo() {
        table.bind(Tier::Focused, *chord, Command::Redo.name(), redo);
    }
}

/// 按平台装上纯文本粘贴和右键菜单快捷键
pub fn install_menu_shortcuts(
    table: &mut BindingTable,
    handlers: &mut HandlerRegistry,
    shortcuts: &PlatformShortcuts,
) {
    let paste_plain = handlers.register(Command::PastePlain);
    let context_menu = handlers.register(Command::ShowContextMenu);
    for chord in shortcuts.paste_plain() {
        table.bind(Tier::Focused, *chord, Command::PastePlain.name(), paste_plain);
    }
    for chord in shortcuts.context_menu() {
        table.bind(
            Tier::Focused,
            *chord,
            Command::ShowContextMenu.name(),
            context_menu,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/keymap.rs"]
mod tests;
