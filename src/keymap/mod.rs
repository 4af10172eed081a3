//! 按键绑定解析

pub mod handler;
pub mod probe;
pub mod resolver;
pub mod table;
pub mod widget;

pub use handler::{Handler, HandlerId, HandlerRegistry};
pub use probe::probe;
pub use resolver::{BindingResolver, ResolvedBinding};
pub use table::{ActionMap, BindingKey, BindingTable, KeyTable, Tier};
pub use widget::{Widget, WidgetId, WidgetKind, WidgetTree, WidgetTreeError};
