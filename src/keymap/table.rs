//! 三层绑定表
//!
//! 每个组件持有三张按键表（Tier）和一张动作表：
//! - KeyTable: 和弦 → 绑定键（BindingKey），未命中时查父表
//! - ActionMap: 绑定键 → 处理器实例（HandlerId），未命中时查父表

use super::handler::HandlerId;
use crate::core::{Chord, KeyPhase};
use compact_str::CompactString;
use crossterm::event::KeyCode;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// 仅当组件自身获得焦点
    Focused,
    /// 组件或其任意后代获得焦点
    AncestorOfFocused,
    /// 组件所在窗口获得焦点
    FocusedWindow,
}

impl Tier {
    /// 固定的优先级顺序
    pub const ALL: [Tier; 3] = [Tier::Focused, Tier::AncestorOfFocused, Tier::FocusedWindow];

    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "focused" | "when_focused" => Some(Self::Focused),
            "ancestor" | "ancestor_of_focused" | "when_ancestor_of_focused_component" => {
                Some(Self::AncestorOfFocused)
            }
            "window" | "focused_window" | "when_in_focused_window" => Some(Self::FocusedWindow),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Tier::Focused => 0,
            Tier::AncestorOfFocused => 1,
            Tier::FocusedWindow => 2,
        }
    }
}

/// 不透明的绑定键，通常就是命令名，也可以是别名
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey(CompactString);

impl BindingKey {
    pub fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BindingKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    bindings: FxHashMap<Chord, BindingKey>,
    /// 可打印字符的文本输入在没有显式绑定时落到这里
    typed_fallback: Option<BindingKey>,
    parent: Option<Arc<KeyTable>>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Arc<KeyTable>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    pub fn bind(&mut self, chord: Chord, key: impl Into<BindingKey>) -> Option<BindingKey> {
        self.bindings.insert(chord, key.into())
    }

    pub fn unbind(&mut self, chord: &Chord) -> Option<BindingKey> {
        self.bindings.remove(chord)
    }

    pub fn set_typed_fallback(&mut self, key: Option<BindingKey>) {
        self.typed_fallback = key;
    }

    pub fn set_parent(&mut self, parent: Option<Arc<KeyTable>>) {
        self.parent = parent;
    }

    /// 查找和弦：本表 → 文本输入兜底 → 父表
    pub fn get(&self, chord: &Chord) -> Option<&BindingKey> {
        if let Some(key) = self.bindings.get(chord) {
            return Some(key);
        }
        if let Some(key) = self.typed_fallback.as_ref() {
            if is_printable_typed(chord) {
                return Some(key);
            }
        }
        self.parent.as_deref().and_then(|p| p.get(chord))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.typed_fallback.is_none()
    }

    /// 绑定到指定键的所有和弦（不含父表）
    pub fn chords_for(&self, key: &BindingKey) -> Vec<Chord> {
        self.bindings
            .iter()
            .filter(|(_, k)| *k == key)
            .map(|(chord, _)| *chord)
            .collect()
    }
}

fn is_printable_typed(chord: &Chord) -> bool {
    match (chord.phase, chord.code) {
        (KeyPhase::Typed, KeyCode::Char(ch)) => !ch.is_control(),
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    handlers: FxHashMap<BindingKey, HandlerId>,
    parent: Option<Arc<ActionMap>>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Arc<ActionMap>) -> Self {
        Self {
            handlers: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    pub fn put(&mut self, key: impl Into<BindingKey>, handler: HandlerId) -> Option<HandlerId> {
        self.handlers.insert(key.into(), handler)
    }

    pub fn remove(&mut self, key: &BindingKey) -> Option<HandlerId> {
        self.handlers.remove(key)
    }

    pub fn get(&self, key: &BindingKey) -> Option<HandlerId> {
        self.handlers
            .get(key)
            .copied()
            .or_else(|| self.parent.as_deref().and_then(|p| p.get(key)))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// 组件的完整绑定表：三层按键表 + 动作表
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    tiers: [KeyTable; 3],
    actions: ActionMap,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self, tier: Tier) -> &KeyTable {
        &self.tiers[tier.index()]
    }

    pub fn tier_mut(&mut self, tier: Tier) -> &mut KeyTable {
        &mut self.tiers[tier.index()]
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionMap {
        &mut self.actions
    }

    /// 便捷写法：同时写入按键表与动作表
    pub fn bind(
        &mut self,
        tier: Tier,
        chord: Chord,
        key: impl Into<BindingKey>,
        handler: HandlerId,
    ) {
        let key = key.into();
        self.tier_mut(tier).bind(chord, key.clone());
        self.actions.put(key, handler);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keymap/table.rs"]
mod tests;
