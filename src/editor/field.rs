//! 无界面的单文档文本框
//!
//! 按键 → 解析器 → 命令（一个 match 分发）→ 变更 → 分类器 → 撤销引擎。
//! 光标和选区都以字符偏移表示，移动和删除按字素簇进行。

use crate::core::{AmbientEvent, Command, KeyInput};
use crate::history::{
    Ambient, CorrelationToken, EditClassifier, HistoryError, Mutation, MutationKind,
    ReplayOutcome, Result, UndoEngine,
};
use crate::keymap::{BindingResolver, WidgetId};
use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// 没有绑定，交给上层
    Unbound,
    Handled(Command),
    /// 命令执行失败（撤销 / 重做被拒绝，或记录已过期）
    Failed {
        command: Command,
        error: HistoryError,
    },
}

impl KeyOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyOutcome::Handled(_))
    }
}

pub struct TextField {
    id: WidgetId,
    rope: Rope,
    caret: usize,
    anchor: Option<usize>,
    editable: bool,
    classifier: EditClassifier,
    history: UndoEngine,
}

impl TextField {
    pub fn new(id: WidgetId) -> Self {
        Self::with_text(id, "")
    }

    /// 初始文本不进入撤销历史
    pub fn with_text(id: WidgetId, text: &str) -> Self {
        let rope = Rope::from_str(text);
        let caret = rope.len_chars();
        Self {
            id,
            rope,
            caret,
            anchor: None,
            editable: true,
            classifier: EditClassifier::new(id),
            history: UndoEngine::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// 带外修改：不经过分类器，也不进入撤销历史
    pub fn rope_mut(&mut self) -> &mut Rope {
        &mut self.rope
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn caret(&self) -> usize {
        self.caret.min(self.len_chars())
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.len_chars());
        self.anchor = None;
    }

    pub fn select(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        self.anchor = Some(range.start.min(len));
        self.caret = range.end.min(len);
    }

    /// 非空选区
    pub fn selection(&self) -> Option<Range<usize>> {
        let caret = self.caret();
        let anchor = self.anchor?.min(self.len_chars());
        if anchor == caret {
            return None;
        }
        Some(anchor.min(caret)..anchor.max(caret))
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    // ==================== 按键 ====================

    pub fn handle_key(&mut self, resolver: &BindingResolver<'_>, event: &AmbientEvent) -> KeyOutcome {
        let Some(key) = event.as_key() else {
            return KeyOutcome::Unbound;
        };
        let Some(binding) = resolver.resolve_from_source(key) else {
            return KeyOutcome::Unbound;
        };

        let command = binding.command.clone();
        tracing::debug!(
            binding = %binding.identity(),
            command = command.name(),
            "field command"
        );

        let ambient = Ambient::new(event, resolver);
        match self.execute(&command, key, ambient) {
            Ok(()) => KeyOutcome::Handled(command),
            Err(error) => KeyOutcome::Failed { command, error },
        }
    }

    fn execute(&mut self, command: &Command, key: &KeyInput, ambient: Ambient<'_>) -> Result<()> {
        if !self.editable && (command.is_edit_command() || command.is_history_command()) {
            tracing::trace!(command = command.name(), "field is read-only");
            return Ok(());
        }

        match command {
            Command::DefaultTyped => {
                let Some(ch) = key.typed_char().filter(|ch| !ch.is_control()) else {
                    return Ok(());
                };
                let mut buf = [0u8; 4];
                self.replace_selection_with(ch.encode_utf8(&mut buf), Some(ambient))
            }
            Command::DeletePrevious => self.delete_previous(ambient),
            Command::DeleteNext => self.delete_next(ambient),
            Command::InsertBreak => self.replace_selection_with("\n", Some(ambient)),
            Command::InsertTab => self.replace_selection_with("\t", Some(ambient)),
            Command::CaretForward => {
                let target = match self.selection() {
                    Some(range) => range.end,
                    None => self.next_boundary(self.caret()),
                };
                self.set_caret(target);
                Ok(())
            }
            Command::CaretBackward => {
                let target = match self.selection() {
                    Some(range) => range.start,
                    None => self.prev_boundary(self.caret()),
                };
                self.set_caret(target);
                Ok(())
            }
            Command::CaretBegin => {
                self.set_caret(0);
                Ok(())
            }
            Command::CaretEnd => {
                self.set_caret(self.len_chars());
                Ok(())
            }
            Command::SelectionForward => {
                let caret = self.caret();
                self.anchor.get_or_insert(caret);
                self.caret = self.next_boundary(caret);
                Ok(())
            }
            Command::SelectionBackward => {
                let caret = self.caret();
                self.anchor.get_or_insert(caret);
                self.caret = self.prev_boundary(caret);
                Ok(())
            }
            Command::SelectAll => {
                self.select(0..self.len_chars());
                Ok(())
            }
            Command::Unselect => {
                self.anchor = None;
                Ok(())
            }
            Command::Undo => self.undo().map(|_| ()),
            Command::Redo => self.redo().map(|_| ()),
            // 菜单和剪贴板由宿主实现，这里只占住按键
            Command::ShowContextMenu | Command::PastePlain => {
                tracing::trace!(command = command.name(), "left to host");
                Ok(())
            }
            Command::SetReadOnly => {
                self.editable = false;
                Ok(())
            }
            Command::SetWritable => {
                self.editable = true;
                Ok(())
            }
            Command::Custom(_) => Ok(()),
        }
    }

    fn delete_previous(&mut self, ambient: Ambient<'_>) -> Result<()> {
        if let Some(range) = self.selection() {
            return self.remove_range(range, Some(ambient), false);
        }
        let caret = self.caret();
        if caret == 0 {
            return Ok(());
        }
        let start = self.prev_boundary(caret);
        self.remove_range(start..caret, Some(ambient), true)
    }

    fn delete_next(&mut self, ambient: Ambient<'_>) -> Result<()> {
        if let Some(range) = self.selection() {
            return self.remove_range(range, Some(ambient), false);
        }
        let caret = self.caret();
        let end = self.next_boundary(caret);
        if end == caret {
            return Ok(());
        }
        self.remove_range(caret..end, Some(ambient), true)
    }

    // ==================== 程序化编辑 ====================

    /// 用 `text` 替换选区（没有选区时在光标处插入）
    ///
    /// 删除和插入共用一个令牌，总是一个撤销步骤。
    pub fn replace_selection(&mut self, text: &str, ambient: Option<Ambient<'_>>) -> Result<()> {
        self.replace_selection_with(text, ambient)
    }

    pub fn insert_str(&mut self, offset: usize, text: &str, ambient: Option<Ambient<'_>>) -> Result<()> {
        if !self.editable {
            return Ok(());
        }
        self.apply(Mutation::insert(offset, text), ambient, true)
    }

    pub fn remove(&mut self, range: Range<usize>, ambient: Option<Ambient<'_>>) -> Result<()> {
        self.remove_range(range, ambient, true)
    }

    /// 显式分组，期间的所有变更共用一个令牌
    pub fn begin_group(&mut self) -> CorrelationToken {
        self.classifier.begin_group()
    }

    pub fn end_group(&mut self) -> bool {
        self.classifier.end_group()
    }

    fn replace_selection_with(&mut self, text: &str, ambient: Option<Ambient<'_>>) -> Result<()> {
        if !self.editable {
            tracing::trace!("field is read-only, edit ignored");
            return Ok(());
        }

        let grouped = ambient.is_none();
        if grouped {
            self.classifier.begin_group();
        }
        let result = self.replace_selection_inner(text, ambient);
        if grouped {
            self.classifier.end_group();
        }
        result
    }

    fn replace_selection_inner(&mut self, text: &str, ambient: Option<Ambient<'_>>) -> Result<()> {
        let offset = match self.selection() {
            Some(range) => {
                let start = range.start;
                self.remove_range(range, ambient, false)?;
                start
            }
            None => self.caret(),
        };
        if text.is_empty() {
            return Ok(());
        }
        self.apply(Mutation::insert(offset, text), ambient, true)
    }

    fn remove_range(
        &mut self,
        range: Range<usize>,
        ambient: Option<Ambient<'_>>,
        tagged: bool,
    ) -> Result<()> {
        if !self.editable {
            tracing::trace!("field is read-only, edit ignored");
            return Ok(());
        }
        if range.is_empty() {
            return Ok(());
        }
        let mutation = Mutation::removal_from(&self.rope, range.start, range.len())?;
        self.apply(mutation, ambient, tagged)
    }

    fn apply(&mut self, mutation: Mutation, ambient: Option<Ambient<'_>>, tagged: bool) -> Result<()> {
        mutation.apply(&mut self.rope)?;
        self.follow(&mutation);

        let classified = self.classifier.classify(mutation, ambient);
        let classified = if tagged {
            classified
        } else {
            classified.without_tag()
        };
        self.history.record_edit(classified);
        Ok(())
    }

    /// 变更之后光标跟着文本移动，选区收起
    fn follow(&mut self, mutation: &Mutation) {
        let caret = self.caret;
        self.caret = match mutation.kind() {
            MutationKind::Insert if caret >= mutation.offset() => caret + mutation.len(),
            MutationKind::Remove if caret >= mutation.end() => caret - mutation.len(),
            MutationKind::Remove if caret > mutation.offset() => mutation.offset(),
            _ => caret,
        };
        self.anchor = None;
    }

    // ==================== 历史 ====================

    pub fn undo(&mut self) -> Result<ReplayOutcome> {
        let outcome = self.history.undo(&mut self.rope)?;
        self.set_caret(outcome.caret);
        Ok(outcome)
    }

    pub fn redo(&mut self) -> Result<ReplayOutcome> {
        let outcome = self.history.redo(&mut self.rope)?;
        self.set_caret(outcome.caret);
        Ok(outcome)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn set_undo_limit(&mut self, limit: Option<usize>) {
        self.history.set_limit(limit);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ==================== 字素边界 ====================

    /// 字素簇不跨行，只切当前行这一段
    fn prev_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.len_chars());
        if offset == 0 {
            return 0;
        }
        let start = self.rope.line_to_char(self.rope.char_to_line(offset - 1));
        let head: Cow<'_, str> = self.rope.slice(start..offset).into();
        let step = head
            .graphemes(true)
            .next_back()
            .map(|g| g.chars().count())
            .unwrap_or(0);
        offset - step
    }

    fn next_boundary(&self, offset: usize) -> usize {
        let len = self.len_chars();
        let offset = offset.min(len);
        if offset == len {
            return len;
        }
        let line = self.rope.char_to_line(offset);
        let end = self.rope.line_to_char(line + 1).min(len);
        let tail: Cow<'_, str> = self.rope.slice(offset..end).into();
        let step = tail
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(0);
        offset + step
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/field.rs"]
mod tests;
