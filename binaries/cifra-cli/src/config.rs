//! CLI configuration (~/.config/cifra/config.yaml)

use anyhow::{Context, Result};
use cifra_cipher::KasiskiConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "CIFRA_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Print Kasiski reports as JSON by default
    pub json: bool,
    pub kasiski: KasiskiConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "cifra=warn,cifra_cipher=warn".into(),
            json: false,
            kasiski: KasiskiConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cifra")
            .join("config.yaml")
    }

    /// Load from `path`, else `$CIFRA_CONFIG`, else the default location.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var_os(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(Self::default_path),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.kasiski.validate()?;
        Ok(config)
    }
}
