//! Emitter configuration.
//!
//! Every field has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! parse_failure_text: true
//! emit_location: true
//! summary: true
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a [`TapEmitter`](crate::TapEmitter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Extract expected/actual values from failure descriptions.
    pub parse_failure_text: bool,

    /// Emit `at`, `file` and `line` keys when a source location is known.
    pub emit_location: bool,

    /// Emit the `# tests`, `# pass` and `# fail` comments after the plan.
    pub summary: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            parse_failure_text: true,
            emit_location: true,
            summary: true,
        }
    }
}

impl EmitterConfig {
    /// Parses a config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_enables_everything() {
        let config = EmitterConfig::default();
        assert!(config.parse_failure_text);
        assert!(config.emit_location);
        assert!(config.summary);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = EmitterConfig::from_yaml_str("").unwrap();
        assert_eq!(config, EmitterConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = EmitterConfig::from_yaml_str("summary: false\n").unwrap();
        assert!(!config.summary);
        assert!(config.parse_failure_text);
        assert!(config.emit_location);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = EmitterConfig::from_yaml_str("summary: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("taplog.yml");
        std::fs::write(&path, "emit_location: false\nparse_failure_text: false\n").unwrap();

        let config = EmitterConfig::load(&path).unwrap();
        assert!(!config.emit_location);
        assert!(!config.parse_failure_text);
        assert!(config.summary);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = EmitterConfig::load(&temp.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.yml"));
    }
}
