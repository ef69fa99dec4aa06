use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsmithConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout. Unset means the HTTP stack's default (none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// How long a notification stays in the status bar.
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where downloads land. Defaults to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}
fn default_tick_ms() -> u64 {
    100
}
fn default_toast_seconds() -> u64 {
    3
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            toast_seconds: default_toast_seconds(),
        }
    }
}

impl DocsmithConfig {
    /// Load config from ~/.config/docsmith/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, writing defaults there if it does not exist.
    pub fn load_from(config_path: &std::path::Path) -> crate::error::Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path).map_err(|e| {
                crate::error::DocsmithError::Config(format!("Failed to read config: {e}"))
            })?;
            let config: DocsmithConfig = toml::from_str(&contents).map_err(|e| {
                crate::error::DocsmithError::Config(format!("Failed to parse config: {e}"))
            })?;
            Ok(config)
        } else {
            let config = DocsmithConfig::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::DocsmithError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::DocsmithError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("docsmith").join("config.toml"))
    }

    /// Directory downloads are written to.
    pub fn download_dir(&self) -> PathBuf {
        self.output
            .download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
