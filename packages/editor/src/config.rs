use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::EditorError;

pub const DEFAULT_CONFIG_NAME: &str = "stencil.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo levels kept (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    100
}

/// Read [`DEFAULT_CONFIG_NAME`] from `dir` into any config type that embeds
/// the editor settings. A missing file yields `T::default()`.
pub fn load_config_file<T>(dir: &Path) -> Result<T, EditorError>
where
    T: DeserializeOwned + Default,
{
    let config_path = dir.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() {
        let content =
            std::fs::read_to_string(&config_path).map_err(|e| EditorError::io(&config_path, e))?;
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(T::default())
    }
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        load_config_file(dir)
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = EditorConfig::from_json(r#"{ "historyLimit": 25 }"#).unwrap();
        assert_eq!(config.history_limit, 25);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_load_without_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "historyLimit": 0 }"#).unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.history_limit, 0);
    }
}
