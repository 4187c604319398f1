use pagekit_workspace::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagekit.config.json";

/// Pagekit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Where compiled pages are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Theme for new pages (dark, light)
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Template for new pages (blank, startup, product)
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Indent compiled markup
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default)]
    pub generation: SessionConfig,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_template() -> String {
    "blank".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            default_theme: default_theme(),
            default_template: default_template(),
            pretty: default_pretty(),
            generation: SessionConfig::default(),
        }
    }
}
