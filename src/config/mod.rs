//! 配置：设置文件、和弦文本、平台快捷键

pub mod chord;
pub mod error;
pub mod platform;
pub mod settings;

pub use chord::parse_chord;
pub use error::ConfigError;
pub use platform::{Platform, PlatformShortcuts};
pub use settings::{apply_keybinding_rules, load_settings, KeybindingRule, Settings};

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
