//! 文档变更：插入 / 删除，偏移和长度都以字符计
//!
//! 变更自带文本（插入的内容或被删掉的内容），
//! 回放时重新校验边界和内容，不符就报 StaleMutation。

use super::error::{HistoryError, Result};
use compact_str::CompactString;
use ropey::Rope;
use slotmap::new_key_type;

new_key_type! { pub struct MutationId; }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Insert,
    Remove,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    kind: MutationKind,
    offset: usize,
    len: usize,
    text: CompactString,
}

impl Mutation {
    pub fn insert(offset: usize, text: impl Into<CompactString>) -> Self {
        Self::new(MutationKind::Insert, offset, text.into())
    }

    pub fn remove(offset: usize, removed: impl Into<CompactString>) -> Self {
        Self::new(MutationKind::Remove, offset, removed.into())
    }

    /// 从当前文档截取 `offset..offset + len` 作为一次删除
    pub fn removal_from(rope: &Rope, offset: usize, len: usize) -> Result<Self> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= rope.len_chars())
            .ok_or(HistoryError::StaleMutation {
                offset,
                len,
                doc_len: rope.len_chars(),
            })?;
        let removed = CompactString::from(rope.slice(offset..end).to_string());
        Ok(Self::remove(offset, removed))
    }

    fn new(kind: MutationKind, offset: usize, text: CompactString) -> Self {
        let len = text.chars().count();
        Self {
            kind,
            offset,
            len,
            text,
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 空变更不计入撤销上限
    pub fn is_significant(&self) -> bool {
        !self.is_empty()
    }

    pub fn inverse(&self) -> Mutation {
        let kind = match self.kind {
            MutationKind::Insert => MutationKind::Remove,
            MutationKind::Remove => MutationKind::Insert,
        };
        Self {
            kind,
            offset: self.offset,
            len: self.len,
            text: self.text.clone(),
        }
    }

    /// 校验后应用；失败时文档不变
    pub fn apply(&self, rope: &mut Rope) -> Result<()> {
        let doc_len = rope.len_chars();
        let stale = HistoryError::StaleMutation {
            offset: self.offset,
            len: self.len,
            doc_len,
        };

        match self.kind {
            MutationKind::Insert => {
                if self.offset > doc_len {
                    return Err(stale);
                }
                rope.insert(self.offset, &self.text);
            }
            MutationKind::Remove => {
                if self.end() > doc_len {
                    return Err(stale);
                }
                if rope.slice(self.offset..self.end()) != self.text.as_str() {
                    return Err(stale);
                }
                rope.remove(self.offset..self.end());
            }
        }
        Ok(())
    }

    pub fn revert(&self, rope: &mut Rope) -> Result<()> {
        self.inverse().apply(rope)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/mutation.rs"]
mod tests;
