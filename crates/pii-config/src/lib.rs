use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for the pii tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Findings below this score are dropped from reports (1 keeps all)
    #[serde(default = "default_min_score")]
    pub min_score: u8,

    /// Mask values in reports and redacted output by default
    #[serde(default = "default_mask")]
    pub mask: bool,

    /// Identifier type tags (e.g. "UPI") excluded from scanning
    #[serde(default)]
    pub disabled_types: Vec<String>,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions eligible for text scanning
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            mask: default_mask(),
            disabled_types: Vec::new(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_min_score() -> u8 {
    1
}

fn default_mask() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    ["txt", "csv", "log", "json", "md"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "pii", "pii") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.pii/config.toml")
        }
    }
}
