use std::env;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use skyfare_filter::{FilterCriteria, SortKey};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub filters: FilterDefaults,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Static,
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    #[serde(default = "default_flights_path")]
    pub flights_path: PathBuf,
    /// Simulated network delay for the static document.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
    #[serde(default = "default_min_latency_ms")]
    pub min_latency_ms: u64,
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u64,
    /// Fixed RNG seed for reproducible mock data.
    pub seed: Option<u64>,
}

fn default_flights_path() -> PathBuf { PathBuf::from("mock-data/flights.json") }
fn default_delay_ms() -> u64 { 500 }
fn default_failure_rate() -> f64 { 0.05 }
fn default_min_latency_ms() -> u64 { 500 }
fn default_max_latency_ms() -> u64 { 1500 }

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_utc_offset_minutes() -> i32 { 180 } // Europe/Istanbul

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl DisplayConfig {
    /// Display offset, or UTC when the configured value is out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FilterDefaults {
    #[serde(default)]
    pub default_sort: SortKey,
    pub default_max_price: Option<f64>,
}

impl FilterDefaults {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_sort(self.default_sort)
            .with_max_price(self.default_max_price)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layered load: `default`, then `$RUN_MODE`, then `local`, then
    /// `SKYFARE__*` environment variables.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let layer = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .set_default("source.kind", "static")?
            .add_source(config::File::with_name(&layer("default")).required(false))
            .add_source(config::File::with_name(&layer(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&layer("local")).required(false))
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
