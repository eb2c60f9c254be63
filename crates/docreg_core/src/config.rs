//! Overlay configuration.
//!
//! # Invariants
//! - Missing fields fall back to defaults; unknown fields are ignored.
//! - The two storage keys must differ, or overrides and added documents
//!   would overwrite each other.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_OVERRIDES_KEY: &str = "nfs.docs.overrides";
pub const DEFAULT_ADDED_KEY: &str = "nfs.docs.added";

/// Durable store keys for the two overlay maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub overrides: String,
    pub added: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            overrides: DEFAULT_OVERRIDES_KEY.to_string(),
            added: DEFAULT_ADDED_KEY.to_string(),
        }
    }
}

/// Top-level configuration for embedding callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub keys: StorageKeys,
    pub log_level: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            log_level: default_log_level().to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    BlankKey(&'static str),
    SharedKey(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid docs config: {err}"),
            Self::BlankKey(field) => write!(f, "storage key `{field}` must not be blank"),
            Self::SharedKey(key) => {
                write!(f, "overrides and added documents cannot share key `{key}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl StorageKeys {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overrides.trim().is_empty() {
            return Err(ConfigError::BlankKey("overrides"));
        }
        if self.added.trim().is_empty() {
            return Err(ConfigError::BlankKey("added"));
        }
        if self.overrides == self.added {
            return Err(ConfigError::SharedKey(self.added.clone()));
        }
        Ok(())
    }
}

impl DocsConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.keys.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DocsConfig, StorageKeys, DEFAULT_ADDED_KEY, DEFAULT_OVERRIDES_KEY};

    #[test]
    fn empty_object_uses_defaults() {
        let config = DocsConfig::from_json("{}").expect("defaults");
        assert_eq!(config, DocsConfig::default());
        assert_eq!(config.keys.overrides, DEFAULT_OVERRIDES_KEY);
        assert_eq!(config.keys.added, DEFAULT_ADDED_KEY);
    }

    #[test]
    fn partial_keys_keep_other_default() {
        let config =
            DocsConfig::from_json(r#"{"keys":{"overrides":"custom"}}"#).expect("partial keys");
        assert_eq!(config.keys.overrides, "custom");
        assert_eq!(config.keys.added, DEFAULT_ADDED_KEY);
    }

    #[test]
    fn rejects_shared_and_blank_keys() {
        let shared = StorageKeys {
            overrides: "same".to_string(),
            added: "same".to_string(),
        };
        assert!(matches!(shared.validate(), Err(ConfigError::SharedKey(_))));

        let err = DocsConfig::from_json(r#"{"keys":{"added":" "}}"#).expect_err("blank key");
        assert!(matches!(err, ConfigError::BlankKey("added")));
    }
}
