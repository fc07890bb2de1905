use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::company::matcher::{DEFAULT_CUTOFF, DEFAULT_LIMIT};
use crate::provider::DataSources;

/// Root configuration structure, deserialized from `.jobscope/config.toml`.
///
/// Every section is optional; missing keys take the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub lookup: LookupConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

/// Table locations, relative to the data directory unless absolute.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub jobs: PathBuf,
    pub companies: PathBuf,
    pub states: Option<PathBuf>,
    pub cities: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            jobs: PathBuf::from("jobs.csv"),
            companies: PathBuf::from("companies.csv"),
            states: Some(PathBuf::from("coordinates_state.csv")),
            cities: Some(PathBuf::from("coordinates_city.csv")),
        }
    }
}

impl DataConfig {
    pub fn sources(&self, data_dir: &Path) -> DataSources {
        DataSources {
            jobs: data_dir.join(&self.jobs),
            companies: data_dir.join(&self.companies),
            states: self.states.as_ref().map(|p| data_dir.join(p)),
            cities: self.cities.as_ref().map(|p| data_dir.join(p)),
        }
    }
}

/// Fuzzy company lookup defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Maximum candidates returned.
    pub limit: usize,
    /// Minimum similarity ratio in `[0, 1]`.
    pub cutoff: f64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            limit: DEFAULT_LIMIT,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown by the jobs lookup table.
    pub sample_size: usize,
    /// Entries per ranking.
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            sample_size: 100,
            top_n: 20,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level for this crate when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Reject values the lookup and reports cannot work with.
    pub fn validate(&self) -> Result<()> {
        check_lookup(self.lookup.limit, self.lookup.cutoff)?;
        if self.report.top_n == 0 {
            bail!("report.top_n must be at least 1");
        }
        Ok(())
    }
}

/// Shared by the config file and the `lookup` command's overrides.
pub fn check_lookup(limit: usize, cutoff: f64) -> Result<()> {
    if limit == 0 {
        bail!("lookup limit must be at least 1");
    }
    if !(0.0..=1.0).contains(&cutoff) {
        bail!("lookup cutoff must be within [0, 1], got {}", cutoff);
    }
    Ok(())
}

/// Load configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<data_dir>/.jobscope/config.toml`
/// 3. `~/.config/jobscope/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(data_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    let config = match find_config(data_dir, config_override) {
        Some(path) => read_config(&path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn find_config(data_dir: &Path, config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(path.to_path_buf());
    }

    let local = data_dir.join(".jobscope").join("config.toml");
    if local.exists() {
        return Some(local);
    }

    let home = dirs::home_dir()?.join(".config").join("jobscope").join("config.toml");
    home.exists().then_some(home)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
