//! Realm configuration.
//!
//! Loaded from TOML or built in code. Every field has a default, so a partial
//! file (or an empty one) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a [`RealmConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config '{path}': {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or had wrong types
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-realm settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Maximum native call depth before `RangeError: Maximum call stack size exceeded`.
    /// Default: 512
    pub max_call_depth: usize,

    /// Maximum nesting depth for `JSON.stringify` before a `RangeError`.
    /// Default: 100
    pub json_max_depth: usize,

    /// Give the realm its own symbol registry instead of the process-wide one.
    /// `Symbol.for` results are then not shared with other realms.
    /// Default: false
    pub isolated_registry: bool,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 512,
            json_max_depth: 100,
            isolated_registry: false,
        }
    }
}

impl RealmConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the native call depth limit.
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Set the `JSON.stringify` nesting limit.
    pub fn json_max_depth(mut self, depth: usize) -> Self {
        self.json_max_depth = depth;
        self
    }

    /// Use a realm-private symbol registry.
    pub fn isolated_registry(mut self, isolated: bool) -> Self {
        self.isolated_registry = isolated;
        self
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "realm config loaded");
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RealmConfig::default();
        assert_eq!(config.max_call_depth, 512);
        assert_eq!(config.json_max_depth, 100);
        assert!(!config.isolated_registry);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RealmConfig::from_toml_str("isolated_registry = true").unwrap();
        assert!(config.isolated_registry);
        assert_eq!(config.json_max_depth, 100);
    }

    #[test]
    fn test_builder() {
        let config = RealmConfig::new().max_call_depth(8).json_max_depth(3);
        assert_eq!(config.max_call_depth, 8);
        assert_eq!(config.json_max_depth, 3);
    }

    #[test]
    fn test_bad_type_is_parse_error() {
        let err = RealmConfig::from_toml_str("max_call_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
