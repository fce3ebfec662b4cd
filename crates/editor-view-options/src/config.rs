//! Startup configuration for the preference store.

use crate::error::ConfigError;
use crate::option::{PreferenceSnapshot, PreferenceStore};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial view option values.
///
/// JSON form: `{"wordWrap": bool, "styleActiveLine": bool, "showLineNumbers": bool}`. Missing keys
/// fall back to the built-in defaults (all on).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptionsConfig {
    /// Values the preference store starts from.
    #[serde(flatten)]
    pub defaults: PreferenceSnapshot,
}

impl ViewOptionsConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build a preference store seeded with these defaults.
    pub fn into_store(self) -> PreferenceStore {
        PreferenceStore::new(self.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewOption;

    #[test]
    fn test_empty_object_keeps_builtin_defaults() {
        let config = ViewOptionsConfig::from_json_str("{}").unwrap();
        assert_eq!(config.defaults, PreferenceSnapshot::default());
    }

    #[test]
    fn test_partial_config_overrides_named_keys() {
        let config = ViewOptionsConfig::from_json_str(r#"{"showLineNumbers": false}"#).unwrap();
        let store = config.into_store();
        assert!(store.get().word_wrap);
        assert!(store.get().active_line_highlight);
        assert!(!store.get().line_number_gutter);
        assert!(store.is_default(ViewOption::LineNumberGutter));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = ViewOptionsConfig::from_json_str(r#"{"wordWrap": "yes"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = ViewOptionsConfig::from_path("/nonexistent/view-options.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
