use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::classify::HabitabilityPolicy;
use crate::data::model::CATALOG_COLUMNS;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "EXOHAB_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "exohab.toml";

pub const DEFAULT_ENDPOINT: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";
pub const DEFAULT_TABLE: &str = "ps";
pub const RAW_SNAPSHOT: &str = "exoplanet_data_extended.csv";
pub const CLEANED_SNAPSHOT: &str = "cleaned_exoplanet_data.csv";

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub table: String,
    pub columns: Vec<String>,
    pub timeout_secs: u64,
    pub max_response_bytes: usize,
    /// Read the raw snapshot instead of querying the archive.
    pub offline: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            table: DEFAULT_TABLE.to_string(),
            columns: CATALOG_COLUMNS.iter().map(|c| c.to_string()).collect(),
            timeout_secs: 60,
            max_response_bytes: 256 * 1024 * 1024,
            offline: false,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub raw_csv: PathBuf,
    pub cleaned_csv: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            raw_csv: PathBuf::from(RAW_SNAPSHOT),
            cleaned_csv: PathBuf::from(CLEANED_SNAPSHOT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub preview_rows: usize,
    pub histogram_bins: usize,
    pub author: String,
    pub bio: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            histogram_bins: 20,
            author: "Feno".to_string(),
            bio: "a researcher interested in the habitability of exoplanets. This app filters \
                  exoplanet data based on criteria like size, orbital period, and host star \
                  characteristics to identify planets that could be habitable."
                .to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: HabitabilityPolicy,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Load from `$EXOHAB_CONFIG`, then `./exohab.toml`, falling back to
    /// defaults when neither exists. A file that exists but does not parse
    /// is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            log::warn!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
