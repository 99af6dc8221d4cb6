//! Shop configuration (`config.toml`).
//!
//! Every field has a default so a missing file or section still starts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ShopError, ShopResult};
use crate::inventory::DEFAULT_INVENTORY_SIZE;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub catalog: PathBuf,
    /// Item kinds are read from `<data_dir>/items/*.toml`
    pub data_dir: PathBuf,
    pub database_url: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("data/shop.toml"),
            data_dir: PathBuf::from("data"),
            database_url: "sqlite://shop.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub use_ledger: bool,
    pub use_wallet: bool,
    /// Balance given to accounts the backend has not seen before
    pub starting_balance: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            use_ledger: true,
            use_wallet: false,
            starting_balance: 1000,
        }
    }
}

/// Settings for the console host binary
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub player_name: String,
    pub inventory_size: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            player_name: "Steve".to_string(),
            inventory_size: DEFAULT_INVENTORY_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub paths: PathsConfig,
    pub economy: EconomyConfig,
    pub host: HostConfig,
    /// Overrides for the built-in message templates
    pub messages: HashMap<String, String>,
}

impl ShopConfig {
    pub fn from_toml_str(content: &str, source: &Path) -> ShopResult<Self> {
        toml::from_str(content).map_err(|e| ShopError::parse(source, e))
    }

    /// Load the config file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> ShopResult<Self> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ShopError::io(path, e))?;
        let config = Self::from_toml_str(&content, path)?;

        info!(
            "Loaded config from {:?} ({} message overrides)",
            path,
            config.messages.len()
        );
        Ok(config)
    }
}
