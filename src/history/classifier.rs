//! 变更分类
//!
//! 给每个原始变更打上“是谁产生的”标签和关联令牌：
//! - 环境事件是按在本文档所属组件上的按键，且解析出 default-typed / delete-previous 时才打标签
//! - 令牌优先取显式分组，其次取环境事件，都没有时每次调用分配一个新令牌

use super::mutation::Mutation;
use crate::core::{AmbientEvent, Command, EventId};
use crate::keymap::{BindingResolver, WidgetId};

/// 可以按位置合并的两类编辑
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditTag {
    DefaultTyped,
    DeletePrevious,
}

impl EditTag {
    pub fn name(self) -> &'static str {
        match self {
            EditTag::DefaultTyped => Command::DEFAULT_TYPED,
            EditTag::DeletePrevious => Command::DELETE_PREVIOUS,
        }
    }
}

/// 同一令牌的变更总是合并
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorrelationToken {
    Event(EventId),
    Group(u64),
    Synthetic(u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedMutation {
    pub mutation: Mutation,
    pub tag: Option<EditTag>,
    pub token: CorrelationToken,
}

impl ClassifiedMutation {
    /// 有选区时的删除不算正常输入
    pub fn without_tag(mut self) -> Self {
        self.tag = None;
        self
    }

    pub fn is_significant(&self) -> bool {
        self.mutation.is_significant()
    }
}

/// 产生变更时正在处理的事件，以及用来解析它的解析器
#[derive(Clone, Copy)]
pub struct Ambient<'a> {
    pub event: &'a AmbientEvent,
    pub resolver: &'a BindingResolver<'a>,
}

impl<'a> Ambient<'a> {
    pub fn new(event: &'a AmbientEvent, resolver: &'a BindingResolver<'a>) -> Self {
        Self { event, resolver }
    }
}

pub struct EditClassifier {
    owner: WidgetId,
    next_token: u64,
    groups: Vec<u64>,
}

impl EditClassifier {
    pub fn new(owner: WidgetId) -> Self {
        Self {
            owner,
            next_token: 0,
            groups: Vec::new(),
        }
    }

    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    /// 开始一个显式分组；嵌套时沿用最外层的令牌
    pub fn begin_group(&mut self) -> CorrelationToken {
        let id = match self.groups.first() {
            Some(&outer) => outer,
            None => self.allocate(),
        };
        self.groups.push(id);
        CorrelationToken::Group(id)
    }

    /// 没有打开的分组时返回 false
    pub fn end_group(&mut self) -> bool {
        self.groups.pop().is_some()
    }

    pub fn in_group(&self) -> bool {
        !self.groups.is_empty()
    }

    pub fn classify(&mut self, mutation: Mutation, ambient: Option<Ambient<'_>>) -> ClassifiedMutation {
        let group = self.groups.first().copied();
        let token = match (group, ambient) {
            (Some(group), _) => CorrelationToken::Group(group),
            (None, Some(ambient)) => CorrelationToken::Event(ambient.event.id),
            (None, None) => CorrelationToken::Synthetic(self.allocate()),
        };
        let tag = ambient.and_then(|ambient| self.tag_for(ambient));

        tracing::trace!(?token, ?tag, offset = mutation.offset(), "mutation classified");
        ClassifiedMutation {
            mutation,
            tag,
            token,
        }
    }

    fn tag_for(&self, ambient: Ambient<'_>) -> Option<EditTag> {
        let key = ambient.event.as_key()?;
        if key.source != Some(self.owner) {
            return None;
        }
        let binding = ambient.resolver.resolve_from_source(key)?;
        [EditTag::DefaultTyped, EditTag::DeletePrevious]
            .into_iter()
            .find(|tag| binding.name_equals(tag.name()))
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_token;
        self.next_token += 1;
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/classifier.rs"]
mod tests;
