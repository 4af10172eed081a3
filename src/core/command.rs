//! 命令系统：文本组件的具名命令
//!
//! 命令名沿用文本工具包的动作名（"default-typed"、"delete-previous" ...），
//! 绑定表与分类器只按名字交流，执行端通过一个 match 分发。

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 编辑操作 ====================
    DefaultTyped,
    DeletePrevious,
    DeleteNext,
    InsertBreak,
    InsertTab,

    // ==================== 光标移动 ====================
    CaretForward,
    CaretBackward,
    CaretBegin,
    CaretEnd,

    // ==================== 选择操作 ====================
    SelectionForward,
    SelectionBackward,
    SelectAll,
    Unselect,

    // ==================== 历史 ====================
    Undo,
    Redo,

    // ==================== 菜单 / 剪贴板 ====================
    ShowContextMenu,
    PastePlain,

    // ==================== 状态 ====================
    SetReadOnly,
    SetWritable,

    // ==================== 扩展点 ====================
    Custom(String),
}

impl Command {
    pub const DEFAULT_TYPED: &'static str = "default-typed";
    pub const DELETE_PREVIOUS: &'static str = "delete-previous";

    pub fn name(&self) -> &str {
        match self {
            Command::DefaultTyped => Self::DEFAULT_TYPED,
            Command::DeletePrevious => Self::DELETE_PREVIOUS,
            Command::DeleteNext => "delete-next",
            Command::InsertBreak => "insert-break",
            Command::InsertTab => "insert-tab",
            Command::CaretForward => "caret-forward",
            Command::CaretBackward => "caret-backward",
            Command::CaretBegin => "caret-begin",
            Command::CaretEnd => "caret-end",
            Command::SelectionForward => "selection-forward",
            Command::SelectionBackward => "selection-backward",
            Command::SelectAll => "select-all",
            Command::Unselect => "unselect",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::ShowContextMenu => "show-context-menu",
            Command::PastePlain => "paste-plain",
            Command::SetReadOnly => "set-read-only",
            Command::SetWritable => "set-writable",
            Command::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "default-typed" => Command::DefaultTyped,
            "delete-previous" => Command::DeletePrevious,
            "delete-next" => Command::DeleteNext,
            "insert-break" => Command::InsertBreak,
            "insert-tab" => Command::InsertTab,
            "caret-forward" => Command::CaretForward,
            "caret-backward" => Command::CaretBackward,
            "caret-begin" => Command::CaretBegin,
            "caret-end" => Command::CaretEnd,
            "selection-forward" => Command::SelectionForward,
            "selection-backward" => Command::SelectionBackward,
            "select-all" => Command::SelectAll,
            "unselect" => Command::Unselect,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "show-context-menu" => Command::ShowContextMenu,
            "paste-plain" => Command::PastePlain,
            "set-read-only" => Command::SetReadOnly,
            "set-writable" => Command::SetWritable,
            other => Command::Custom(other.to_string()),
        }
    }

    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::DefaultTyped
                | Command::DeletePrevious
                | Command::DeleteNext
                | Command::InsertBreak
                | Command::InsertTab
        )
    }

    pub fn is_history_command(&self) -> bool {
        matches!(self, Command::Undo | Command::Redo)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
