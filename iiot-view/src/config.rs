use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::derive::BandThresholds;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub render: RenderConfig,
    /// Lower bounds of the KPI bands.
    pub kpi: BandThresholds,
}

#[derive(Debug, Default, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Built-in showcase facts.
    #[default]
    Demo,
    /// Snapshot file exported by the telemetry backend (.toml or .json).
    File { path: PathBuf },
    /// Randomly generated plant.
    Simulated {
        #[serde(default = "default_device_count")]
        device_count: usize,
        #[serde(default = "default_sample_count")]
        sample_count: usize,
        /// Spacing between telemetry samples
        #[serde(default = "default_sample_interval_secs")]
        sample_interval_secs: u64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pretty-print the JSON output
    pub pretty: bool,
    /// Seconds between refreshes in watch mode
    pub refresh_interval_secs: u64,
}

impl RenderConfig {
    /// Refresh period, never shorter than one second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            refresh_interval_secs: 5,
        }
    }
}

fn default_device_count() -> usize {
    3
}

fn default_sample_count() -> usize {
    6
}

fn default_sample_interval_secs() -> u64 {
    600
}

impl Config {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
