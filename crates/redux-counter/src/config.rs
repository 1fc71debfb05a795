//! Application configuration
//!
//! Loaded from `.redux-counter.toml` in the current directory, then the home
//! directory, falling back to defaults.

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".redux-counter.toml";

/// Counter configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Starting value; when absent the store bootstraps through `Initialize`
    #[serde(default)]
    pub initial_value: Option<i64>,

    /// Amount added by `+` and removed by `-`
    #[serde(default = "default_step")]
    pub step: i64,

    /// Install the middleware that doubles `add` amounts
    #[serde(default)]
    pub double_payloads: bool,

    /// Upper bound enforced by the limit middleware
    #[serde(default)]
    pub max_value: Option<i64>,

    /// Log every dispatched action
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_step() -> i64 {
    1
}

fn default_log_actions() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            initial_value: None,
            step: default_step(),
            double_payloads: false,
            max_value: None,
            log_actions: default_log_actions(),
            log_level: default_log_level(),
        }
    }
}

impl CounterConfig {
    /// Load config from CWD first, then home directory, or use defaults
    ///
    /// Runs before the logger is initialised, so problems are returned as a
    /// warning message for the caller to log.
    pub fn load() -> (Self, Option<String>) {
        match load_config_file() {
            Some((path, content)) => match Self::parse(&content) {
                Ok(config) => (config, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("Failed to parse {}: {}", path.display(), e)),
                ),
            },
            None => (Self::default(), None),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Read the config file from CWD first, then the home directory
fn load_config_file() -> Option<(PathBuf, String)> {
    let local = PathBuf::from(CONFIG_FILE);
    if let Ok(content) = std::fs::read_to_string(&local) {
        return Some((local, content));
    }

    let home = home_config_path()?;
    std::fs::read_to_string(&home)
        .ok()
        .map(|content| (home, content))
}

/// `~/.redux-counter.toml` if HOME is set
fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = CounterConfig::default();
        assert_eq!(config.initial_value, None);
        assert_eq!(config.step, 1);
        assert!(!config.double_payloads);
        assert_eq!(config.max_value, None);
        assert!(config.log_actions);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            initial_value = 10
            step = 5
            double_payloads = true
            max_value = 100
            log_actions = false
            log_level = "debug"
        "#;
        let config = CounterConfig::parse(toml).unwrap();
        assert_eq!(
            config,
            CounterConfig {
                initial_value: Some(10),
                step: 5,
                double_payloads: true,
                max_value: Some(100),
                log_actions: false,
                log_level: "debug".to_string(),
            }
        );
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = CounterConfig::parse("step = 3").unwrap();
        assert_eq!(config.step, 3);
        assert_eq!(config.initial_value, None);
        assert!(config.log_actions);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        assert!(CounterConfig::parse(r#"step = "two""#).is_err());
    }

    #[test]
    fn test_home_config_path() {
        if let Some(path) = home_config_path() {
            assert!(path.ends_with(CONFIG_FILE));
        }
    }
}
