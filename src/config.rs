use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::history::DEFAULT_CAPACITY;
use crate::registry::openfoodfacts::DEFAULT_BASE_URL;

/// Root configuration structure, deserialized from `.food-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where product data is fetched from.
    pub upstream: UpstreamConfig,
    /// Where and how much scan history is kept.
    pub history: HistoryConfig,
    /// Additions to and replacements for the built-in reference tables.
    #[serde(flatten)]
    pub reference: ReferenceOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Number of lookups in flight at once during a batch scan.
    pub batch_size: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            batch_size: 25,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Directory holding the history blob. Defaults to the platform data dir.
    pub path: Option<PathBuf>,
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    pub fn dir(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .map(|d| d.join("food-checkr"))
                .unwrap_or_else(|| PathBuf::from(".food-checkr")),
        }
    }
}

/// Reference-table overrides. Entries are validated when the tables are
/// built, not here, so a bad entry never prevents the config from loading.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReferenceOverrides {
    /// `[additives.e330]` → function label and risk label.
    pub additives: HashMap<String, AdditiveOverride>,
    /// `[names]` → `e330 = "Citric acid"`.
    pub names: HashMap<String, String>,
    /// `[nutrients.fat]` → `moderate` / `high` lower bounds per 100 g.
    pub nutrients: HashMap<String, ThresholdOverride>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct AdditiveOverride {
    pub function: String,
    pub risk: String,
}

#[derive(Debug, Default, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ThresholdOverride {
    pub moderate: Option<f64>,
    pub high: Option<f64>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.food-checkr/config.toml`
/// 3. `~/.config/food-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = Path::new(".food-checkr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("food-checkr").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
