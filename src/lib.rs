//! keyedit - 文本组件的按键解析与复合撤销
//!
//! 模块结构：
//! - core: 输入事件、和弦、命令
//! - keymap: 三层绑定表、组件树、按键解析
//! - history: 变更分类、复合编辑、撤销引擎
//! - editor: 无界面文本框外壳与默认键位
//! - config: 设置文件、和弦文本、平台快捷键

pub mod config;
pub mod core;
pub mod editor;
pub mod history;
pub mod keymap;
