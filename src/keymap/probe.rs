//! 同层冲突的裁决规则
//!
//! 工具包自己分发按键时，对一张按键表只看第一个非空的绑定键，
//! 然后到动作表取处理器；绑定键存在但没有处理器时，结果为空，不会继续找别的绑定。
//! 这里把这条规则写成纯函数，解析器用它做身份校验。

use super::handler::HandlerId;
use super::table::{ActionMap, KeyTable};
use crate::core::Chord;

/// 只装了 `table` 这一层按键表时，分发器会调用的处理器
pub fn probe(table: &KeyTable, actions: &ActionMap, chord: &Chord) -> Option<HandlerId> {
    let key = table.get(chord)?;
    actions.get(key)
}

#[cfg(test)]
#[path = "../../tests/unit/keymap/probe.rs"]
mod tests;
