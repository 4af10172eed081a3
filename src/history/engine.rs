//! 撤销引擎
//!
//! 线性历史：`compounds[..cursor]` 已生效，`compounds[cursor..]` 已撤销。
//! 撤销之后再记录新编辑，会丢弃已撤销的尾部，不产生分支。
//!
//! 变更记录放在 arena 里，复合编辑只保存句柄；
//! 复合编辑被丢弃时，对应的 arena 槽位一起释放。
//!
//! 只在单线程上使用，引擎内部不加锁。

use super::classifier::ClassifiedMutation;
use super::compound::{should_merge, CompoundEdit, CompoundState};
use super::error::{HistoryError, Result};
use super::mutation::{MutationId, MutationKind};
use ropey::Rope;
use slotmap::SlotMap;

/// 默认保留的有效复合编辑数
pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// 一次撤销 / 重做的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// 建议的光标位置（字符偏移）
    pub caret: usize,
    /// 回放的变更数
    pub mutations: usize,
}

pub struct UndoEngine {
    arena: SlotMap<MutationId, ClassifiedMutation>,
    compounds: Vec<CompoundEdit>,
    cursor: usize,
    limit: Option<usize>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_limit(Some(DEFAULT_UNDO_LIMIT))
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            arena: SlotMap::with_key(),
            compounds: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// 记录一个已经应用到文档上的变更
    pub fn record_edit(&mut self, edit: ClassifiedMutation) -> MutationId {
        self.discard_redo_tail();

        let significant = edit.is_significant();
        let merge = self
            .compounds
            .last()
            .filter(|compound| compound.is_open())
            .and_then(|compound| compound.last())
            .and_then(|last| self.arena.get(last))
            .is_some_and(|last| should_merge(&edit, last));

        tracing::trace!(
            token = ?edit.token,
            tag = ?edit.tag,
            merge,
            "record edit"
        );

        let id = self.arena.insert(edit);
        match self.compounds.last_mut() {
            Some(compound) if merge => compound.push(id, significant),
            _ => {
                self.compounds.push(CompoundEdit::new(id, significant));
                self.cursor = self.compounds.len();
            }
        }

        self.trim();
        id
    }

    /// 按插入的逆序回滚最近一个已生效的复合编辑
    ///
    /// 回放先在文档副本上进行，全部成功才写回；失败时文档和栈都不变。
    pub fn undo(&mut self, rope: &mut Rope) -> Result<ReplayOutcome> {
        if !self.can_undo() {
            tracing::debug!(cursor = self.cursor, "undo refused");
            return Err(HistoryError::IllegalUndo);
        }
        let index = self.cursor - 1;
        let compound = self
            .compounds
            .get(index)
            .ok_or(HistoryError::IllegalUndo)?;

        let mut staged = rope.clone();
        let mut caret = 0;
        let mut replayed = 0;
        for &id in compound.entries().iter().rev() {
            let Some(entry) = self.arena.get(id) else {
                continue;
            };
            let mutation = &entry.mutation;
            if let Err(err) = mutation.revert(&mut staged) {
                tracing::debug!(%err, "undo failed");
                return Err(err);
            }
            caret = match mutation.kind() {
                MutationKind::Insert => mutation.offset(),
                MutationKind::Remove => mutation.end(),
            };
            replayed += 1;
        }

        *rope = staged;
        if let Some(compound) = self.compounds.get_mut(index) {
            compound.set_state(CompoundState::Undone);
        }
        self.cursor = index;
        tracing::debug!(index, mutations = replayed, "undo");

        Ok(ReplayOutcome {
            caret,
            mutations: replayed,
        })
    }

    /// 按原顺序重放最近一个已撤销的复合编辑
    pub fn redo(&mut self, rope: &mut Rope) -> Result<ReplayOutcome> {
        if !self.can_redo() {
            tracing::debug!(cursor = self.cursor, "redo refused");
            return Err(HistoryError::IllegalRedo);
        }
        let index = self.cursor;
        let compound = self
            .compounds
            .get(index)
            .ok_or(HistoryError::IllegalRedo)?;

        let mut staged = rope.clone();
        let mut caret = 0;
        let mut replayed = 0;
        for &id in compound.entries() {
            let Some(entry) = self.arena.get(id) else {
                continue;
            };
            let mutation = &entry.mutation;
            if let Err(err) = mutation.apply(&mut staged) {
                tracing::debug!(%err, "redo failed");
                return Err(err);
            }
            caret = match mutation.kind() {
                MutationKind::Insert => mutation.end(),
                MutationKind::Remove => mutation.offset(),
            };
            replayed += 1;
        }

        *rope = staged;
        if let Some(compound) = self.compounds.get_mut(index) {
            compound.set_state(CompoundState::Redone);
        }
        self.cursor = index + 1;
        tracing::debug!(index, mutations = replayed, "redo");

        Ok(ReplayOutcome {
            caret,
            mutations: replayed,
        })
    }

    pub fn can_undo(&self) -> bool {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.compounds.get(index))
            .is_some_and(|compound| compound.state().can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.compounds
            .get(self.cursor)
            .is_some_and(|compound| compound.state().can_redo())
    }

    /// `None` 不限制；`Some(0)` 不保留任何有效编辑
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.trim();
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.compounds.clear();
        self.cursor = 0;
    }

    pub fn compounds(&self) -> &[CompoundEdit] {
        &self.compounds
    }

    pub fn mutation(&self, id: MutationId) -> Option<&ClassifiedMutation> {
        self.arena.get(id)
    }

    /// arena 中仍存活的变更记录数
    pub fn live_mutations(&self) -> usize {
        self.arena.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.compounds.len() - self.cursor
    }

    fn discard_redo_tail(&mut self) {
        if self.cursor >= self.compounds.len() {
            return;
        }
        let tail: Vec<CompoundEdit> = self.compounds.drain(self.cursor..).collect();
        tracing::trace!(discarded = tail.len(), "discard redo tail");
        self.release(&tail);
    }

    /// 从新到旧数有效复合编辑，超过上限处及更旧的整体丢弃
    fn trim(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        let Some(mut cut) = self.trim_point(limit) else {
            return;
        };

        // 裁剪点落在已撤销的部分：保留下来的重做步骤会接不上文档，整段丢掉
        if cut >= self.cursor {
            self.discard_redo_tail();
            match self.trim_point(limit) {
                Some(point) => cut = point,
                None => return,
            }
        }

        let dropped: Vec<CompoundEdit> = self.compounds.drain(..=cut).collect();
        self.cursor = self.cursor.saturating_sub(dropped.len());
        tracing::debug!(dropped = dropped.len(), limit, "trim undo history");
        self.release(&dropped);
    }

    /// 从新到旧数有效步骤，超出上限的第一个（连同更旧的）要丢掉
    fn trim_point(&self, limit: usize) -> Option<usize> {
        let mut significant = 0;
        for (index, compound) in self.compounds.iter().enumerate().rev() {
            if !compound.is_significant() {
                continue;
            }
            significant += 1;
            if significant > limit {
                return Some(index);
            }
        }
        None
    }

    fn release(&mut self, compounds: &[CompoundEdit]) {
        for compound in compounds {
            for &id in compound.entries() {
                self.arena.remove(id);
            }
        }
    }
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/engine.rs"]
mod tests;
