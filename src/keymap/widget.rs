//! 组件树
//!
//! 只保存按键解析需要的信息：种类、启用状态、父指针、绑定表。

use super::table::BindingTable;
use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! { pub struct WidgetId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    /// 可交互组件，持有绑定表
    Component,
    /// 不可交互的布局容器，解析时跳过
    Container,
    /// 内嵌子窗口：祖先遍历到此为止，其绑定对后代不可见
    InternalFrame,
    /// 顶层窗口边界
    Window,
}

impl WidgetKind {
    pub fn is_interactive(self) -> bool {
        matches!(self, WidgetKind::Component | WidgetKind::InternalFrame)
    }
}

#[derive(Debug)]
pub enum WidgetTreeError {
    InvalidWidgetId,
    WindowNotRoot,
}

impl fmt::Display for WidgetTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetTreeError::InvalidWidgetId => write!(f, "invalid widget id"),
            WidgetTreeError::WindowNotRoot => write!(f, "a window can only be a root widget"),
        }
    }
}

impl std::error::Error for WidgetTreeError {}

#[derive(Debug, Clone)]
pub struct Widget {
    kind: WidgetKind,
    enabled: bool,
    parent: Option<WidgetId>,
    bindings: BindingTable,
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }
}

#[derive(Debug, Default)]
pub struct WidgetTree {
    arena: SlotMap<WidgetId, Widget>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_root(&mut self, kind: WidgetKind) -> WidgetId {
        self.arena.insert(Widget {
            kind,
            enabled: true,
            parent: None,
            bindings: BindingTable::new(),
        })
    }

    pub fn insert_child(
        &mut self,
        parent: WidgetId,
        kind: WidgetKind,
    ) -> Result<WidgetId, WidgetTreeError> {
        if !self.arena.contains_key(parent) {
            return Err(WidgetTreeError::InvalidWidgetId);
        }
        if kind == WidgetKind::Window {
            return Err(WidgetTreeError::WindowNotRoot);
        }

        Ok(self.arena.insert(Widget {
            kind,
            enabled: true,
            parent: Some(parent),
            bindings: BindingTable::new(),
        }))
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.arena.get(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<(), WidgetTreeError> {
        let widget = self
            .arena
            .get_mut(id)
            .ok_or(WidgetTreeError::InvalidWidgetId)?;
        widget.enabled = enabled;
        Ok(())
    }

    pub fn bindings_mut(&mut self, id: WidgetId) -> Option<&mut BindingTable> {
        self.arena.get_mut(id).map(|w| &mut w.bindings)
    }

    /// 删除组件及其子树
    pub fn remove(&mut self, id: WidgetId) -> Result<(), WidgetTreeError> {
        if !self.arena.contains_key(id) {
            return Err(WidgetTreeError::InvalidWidgetId);
        }
        let doomed: Vec<WidgetId> = self
            .arena
            .keys()
            .filter(|&candidate| self.is_descendant_or_self(candidate, id))
            .collect();
        for widget in doomed {
            self.arena.remove(widget);
        }
        Ok(())
    }

    fn is_descendant_or_self(&self, candidate: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = Some(candidate);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.arena.get(id).and_then(|w| w.parent);
        }
        false
    }

    /// 从 `source` 向外到根的组件序列（含 `source`）
    pub fn focus_path(&self, source: WidgetId) -> Vec<WidgetId> {
        let mut path = Vec::new();
        let mut current = Some(source);
        while let Some(id) = current {
            let Some(widget) = self.arena.get(id) else {
                break;
            };
            path.push(id);
            current = widget.parent;
        }
        path
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keymap/widget.rs"]
mod tests;
