//! Configuration file support for exsel.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/exsel/config.toml`.

use crate::{Locale, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog source configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogConfig {
    /// Directory of JSON catalog files; the built-in catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Selection engine switches
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Require the implied machine for indoor cardio in custom environments
    #[serde(default)]
    pub gate_cardio_equipment: bool,

    /// Issue the catalog loads of one request in parallel
    #[serde(default = "default_concurrent_loads")]
    pub concurrent_loads: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gate_cardio_equipment: false,
            concurrent_loads: default_concurrent_loads(),
        }
    }
}

/// Document rendering configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// List equipment for every exercise, not just suspension and kettlebell ones
    #[serde(default)]
    pub verbose_equipment: bool,

    /// Locale used when a profile names no language
    #[serde(default)]
    pub default_locale: Locale,
}

fn default_concurrent_loads() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let Some(config_path) = Self::default_config_path() else {
            tracing::info!("No config directory available, using defaults");
            return Ok(Self::default());
        };
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("exsel").join("config.toml"))
    }
}
