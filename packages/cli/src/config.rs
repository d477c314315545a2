use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stencil_editor::{load_config_file, EditorConfig};

/// Stencil configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Template file edited when no path is given
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_template() -> String {
    "template.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        Ok(load_config_file(cwd)?)
    }

    /// Template path, an explicit argument taking precedence over the config
    pub fn template_path(&self, cwd: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => cwd.join(path),
            None => cwd.join(&self.template),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: default_template(),
            editor: EditorConfig::default(),
        }
    }
}
