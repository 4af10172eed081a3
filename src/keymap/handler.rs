//! 处理器实例
//!
//! 两个组件可以把同一个命令名绑到不同的处理器实例上；
//! 身份比较按实例（HandlerId），名字比较只作为较宽松的交叉校验。

use crate::core::Command;
use slotmap::{new_key_type, SlotMap};

new_key_type! { pub struct HandlerId; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    command: Command,
}

impl Handler {
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// 处理器自己声明的名字
    pub fn name(&self) -> &str {
        self.command.name()
    }
}

#[derive(Debug, Default)]
pub struct HandlerRegistry {
    arena: SlotMap<HandlerId, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次调用都产生一个新实例，即使命令相同
    pub fn register(&mut self, command: Command) -> HandlerId {
        self.arena.insert(Handler { command })
    }

    pub fn get(&self, id: HandlerId) -> Option<&Handler> {
        self.arena.get(id)
    }

    pub fn remove(&mut self, id: HandlerId) -> Option<Handler> {
        self.arena.remove(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
