use super::chord::parse_chord;
use super::error::ConfigError;
use super::platform::{Platform, PlatformShortcuts};
use crate::core::Command;
use crate::history::DEFAULT_UNDO_LIMIT;
use crate::keymap::{BindingKey, BindingTable, HandlerRegistry, Tier};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// `null` 表示不限制
    #[serde(default = "default_undo_limit")]
    pub undo_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    /// 空字符串表示解除绑定
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

fn default_undo_limit() -> Option<usize> {
    Some(DEFAULT_UNDO_LIMIT)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
            platform: None,
            keybindings: Vec::new(),
        }
    }
}

impl Settings {
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    pub fn shortcuts(&self) -> PlatformShortcuts {
        PlatformShortcuts::for_platform(self.platform())
    }
}

/// 文件不存在时返回默认设置
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "settings file missing, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// 把用户规则写进组件的绑定表，返回生效的规则数
///
/// 同名命令复用表里已有的处理器，没有时新注册一个。
pub fn apply_keybinding_rules(
    table: &mut BindingTable,
    handlers: &mut HandlerRegistry,
    rules: &[KeybindingRule],
) -> Result<usize, ConfigError> {
    let mut applied = 0;
    for rule in rules {
        let chord = parse_chord(&rule.key)?;
        let tier = match rule.tier.as_deref() {
            None => Tier::Focused,
            Some(value) => {
                Tier::parse(value).ok_or_else(|| ConfigError::UnknownTier(value.to_string()))?
            }
        };

        if rule.command.trim().is_empty() {
            let _ = table.tier_mut(tier).unbind(&chord);
            tracing::debug!(%chord, ?tier, "keybinding removed");
            applied += 1;
            continue;
        }

        let command = Command::from_name(&rule.command);
        let key = BindingKey::new(command.name());
        let handler = match table.actions().get(&key) {
            Some(handler) => handler,
            None => handlers.register(command),
        };
        tracing::debug!(%chord, ?tier, binding = %key, "keybinding applied");
        table.bind(tier, chord, key, handler);
        applied += 1;
    }
    Ok(applied)
}
