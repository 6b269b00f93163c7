use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store key used when none is configured
pub const DEFAULT_STORE_KEY: &str = "taskList";

/// Configuration from config.toml in the store directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// The configured store key, falling back to the default when blank
    pub fn store_key(&self) -> &str {
        let key = self.store.key.trim();
        if key.is_empty() { DEFAULT_STORE_KEY } else { key }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the task list is stored under
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            key: default_store_key(),
        }
    }
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// trace|debug|info|warn|error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, keyed by theme slot name, hex values
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_store_key_falls_back() {
        let mut config = Config::default();
        assert_eq!(config.store_key(), "taskList");
        config.store.key = "  ".into();
        assert_eq!(config.store_key(), DEFAULT_STORE_KEY);
        config.store.key = "work".into();
        assert_eq!(config.store_key(), "work");
    }
}
