//! 核心类型
//!
//! - Event: 按键事件与和弦
//! - Command: 具名文本命令

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{AmbientEvent, Chord, EventClock, EventId, InputEvent, KeyInput, KeyPhase};
