//! 按键解析：按工具包自己的分发优先级，找出一个按键事件会触发的绑定，但不执行它
//!
//! 顺序：
//! 1. 源组件的 Focused 层（扩展和弦优先，主和弦兜底）
//! 2. 从源组件向外，每个可交互组件的 AncestorOfFocused 层
//!    - 跳过布局容器
//!    - 遇到顶层窗口或内嵌子窗口停止
//! 3. 第一个命中的层胜出

use super::handler::{HandlerId, HandlerRegistry};
use super::probe::probe;
use super::table::{BindingKey, Tier};
use super::widget::{Widget, WidgetId, WidgetKind, WidgetTree};
use crate::core::{Chord, Command, KeyInput};
use compact_str::CompactString;

/// 解析结果：命中的组件、层、和弦、绑定键和处理器实例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    pub widget: WidgetId,
    pub tier: Tier,
    pub chord: Chord,
    pub binding: BindingKey,
    pub handler: HandlerId,
    pub command: Command,
    handler_name: CompactString,
}

impl ResolvedBinding {
    /// 主身份是绑定键
    pub fn identity(&self) -> &BindingKey {
        &self.binding
    }

    /// 处理器自己声明的名字（可能与绑定键不同）
    pub fn display_name(&self) -> &str {
        &self.handler_name
    }

    /// 绑定键或处理器名字任一相等即视为同名
    pub fn name_equals(&self, name: &str) -> bool {
        self.binding.as_str() == name || self.handler_name == name
    }
}

pub struct BindingResolver<'a> {
    widgets: &'a WidgetTree,
    handlers: &'a HandlerRegistry,
}

impl<'a> BindingResolver<'a> {
    pub fn new(widgets: &'a WidgetTree, handlers: &'a HandlerRegistry) -> Self {
        Self { widgets, handlers }
    }

    pub fn widgets(&self) -> &'a WidgetTree {
        self.widgets
    }

    /// 按源组件的祖先链解析
    pub fn resolve_from_source(&self, event: &KeyInput) -> Option<ResolvedBinding> {
        let source = event.source?;
        let path = self.widgets.focus_path(source);
        self.resolve(event, &path)
    }

    /// `focus_path` 从事件源开始向外排列；首元素必须是事件源
    pub fn resolve(&self, event: &KeyInput, focus_path: &[WidgetId]) -> Option<ResolvedBinding> {
        let source = event.source?;
        let widget = self.widgets.get(source)?;
        if !widget.kind().is_interactive() {
            return None;
        }
        if focus_path.first() != Some(&source) {
            tracing::debug!(?source, "focus path does not start at event source");
            return None;
        }
        if !widget.is_enabled() {
            tracing::trace!(?source, "source disabled, no binding");
            return None;
        }

        let chords = event.candidate_chords();

        for chord in &chords {
            if let Some(hit) = self.resolve_tier(source, widget, chord, Tier::Focused) {
                return Some(self.trace_hit(hit));
            }
        }

        for &id in focus_path {
            let Some(ancestor) = self.widgets.get(id) else {
                break;
            };
            match ancestor.kind() {
                WidgetKind::Window => break,
                WidgetKind::Container => continue,
                WidgetKind::InternalFrame if id != source => break,
                WidgetKind::InternalFrame | WidgetKind::Component => {}
            }

            for chord in &chords {
                if let Some(hit) = self.resolve_tier(id, ancestor, chord, Tier::AncestorOfFocused) {
                    return Some(self.trace_hit(hit));
                }
            }

            if ancestor.kind() == WidgetKind::InternalFrame {
                break;
            }
        }

        tracing::trace!(chord = %event.primary_chord(), "no binding");
        None
    }

    /// 一层命中的条件：组件启用、动作表里有处理器、且该处理器与裁决函数选出的是同一个实例
    fn resolve_tier(
        &self,
        id: WidgetId,
        widget: &Widget,
        chord: &Chord,
        tier: Tier,
    ) -> Option<ResolvedBinding> {
        if !widget.is_enabled() {
            return None;
        }
        let table = widget.bindings();
        let expected = probe(table.tier(tier), table.actions(), chord)?;

        // 同一和弦可能在三张表里指向不同绑定键，取第一个指向同一实例的
        for scan in Tier::ALL {
            let Some(binding) = table.tier(scan).get(chord) else {
                continue;
            };
            if table.actions().get(binding) != Some(expected) {
                continue;
            }
            let handler = self.handlers.get(expected)?;
            return Some(ResolvedBinding {
                widget: id,
                tier,
                chord: *chord,
                binding: binding.clone(),
                handler: expected,
                command: handler.command().clone(),
                handler_name: CompactString::new(handler.name()),
            });
        }
        None
    }

    fn trace_hit(&self, hit: ResolvedBinding) -> ResolvedBinding {
        tracing::trace!(
            chord = %hit.chord,
            binding = %hit.binding,
            tier = ?hit.tier,
            "binding resolved"
        );
        hit
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keymap/resolver.rs"]
mod tests;
