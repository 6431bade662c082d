//! Runtime configuration for the store and logging.
//!
//! Defaults describe an in-memory store with build-mode logging; each value
//! can be overridden from the environment.

use crate::logging::default_log_level;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "CHEESEBOARD_DB";
pub const ENV_BUSY_TIMEOUT_MS: &str = "CHEESEBOARD_BUSY_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "CHEESEBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CHEESEBOARD_LOG_DIR";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    pub busy_timeout: Duration,
    pub log_level: String,
    /// `None` leaves file logging disabled.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by `CHEESEBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = non_empty(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = non_empty(ENV_BUSY_TIMEOUT_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_BUSY_TIMEOUT_MS,
                    value: raw.clone(),
                    reason: "expected milliseconds as an unsigned integer",
                })?;
            config.busy_timeout = Duration::from_millis(millis);
        }
        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_string();
        }
        if let Some(dir) = non_empty(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_BUSY_TIMEOUT_MS, ENV_DB_PATH, ENV_LOG_DIR};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_in_memory_store() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path.is_none());
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn env_values_override_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/cheese.db"),
            (ENV_BUSY_TIMEOUT_MS, "250"),
            (ENV_LOG_DIR, "  "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/cheese.db")));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_BUSY_TIMEOUT_MS, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_BUSY_TIMEOUT_MS,
                ..
            }
        ));
    }
}
