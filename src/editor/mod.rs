//! 文本框外壳：把解析器、分类器和撤销引擎接到一个文档上

pub mod field;
pub mod keymap;

pub use field::{KeyOutcome, TextField};
pub use keymap::{
    field_bindings, install_history_shortcuts, install_menu_shortcuts, DEFAULT_ACTION,
};
