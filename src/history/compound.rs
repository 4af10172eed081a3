//! 复合编辑：一次撤销 / 重做的单位

use super::classifier::{ClassifiedMutation, EditTag};
use super::mutation::{MutationId, MutationKind};

/// Open → Undone → Redone → Undone → ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompoundState {
    Open,
    Undone,
    Redone,
}

impl CompoundState {
    pub fn can_undo(self) -> bool {
        matches!(self, CompoundState::Open | CompoundState::Redone)
    }

    pub fn can_redo(self) -> bool {
        self == CompoundState::Undone
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundEdit {
    entries: Vec<MutationId>,
    state: CompoundState,
    significant: bool,
}

impl CompoundEdit {
    pub(super) fn new(first: MutationId, significant: bool) -> Self {
        Self {
            entries: vec![first],
            state: CompoundState::Open,
            significant,
        }
    }

    pub fn entries(&self) -> &[MutationId] {
        &self.entries
    }

    pub fn last(&self) -> Option<MutationId> {
        self.entries.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> CompoundState {
        self.state
    }

    /// 至少含一个非空变更
    pub fn is_significant(&self) -> bool {
        self.significant
    }

    pub fn is_open(&self) -> bool {
        self.state == CompoundState::Open
    }

    pub(super) fn push(&mut self, id: MutationId, significant: bool) {
        self.entries.push(id);
        self.significant |= significant;
    }

    pub(super) fn set_state(&mut self, state: CompoundState) {
        self.state = state;
    }
}

/// 新变更能否并入上一个变更所在的复合编辑
///
/// 同令牌总是合并；否则只有两种按位置连续的情况：
/// 连续向后输入，以及连续向前退格。向前删除不合并。
pub fn should_merge(new: &ClassifiedMutation, last: &ClassifiedMutation) -> bool {
    if new.token == last.token {
        return true;
    }

    let (Some(new_tag), Some(last_tag)) = (new.tag, last.tag) else {
        return false;
    };
    if new_tag != last_tag {
        return false;
    }

    let (new, last) = (&new.mutation, &last.mutation);
    match new_tag {
        EditTag::DefaultTyped => {
            new.kind() == MutationKind::Insert
                && last.kind() == MutationKind::Insert
                && last.end() == new.offset()
        }
        EditTag::DeletePrevious => {
            new.kind() == MutationKind::Remove
                && last.kind() == MutationKind::Remove
                && new.end() == last.offset()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/compound.rs"]
mod tests;
