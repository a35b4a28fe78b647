//! Configuration structures for the fish-detector system.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Buffer sizing and randomness.
    pub detector: DetectorConfig,
    /// Classifier thresholds.
    pub rules: RulesConfig,
    /// Query parameter defaults.
    pub query: QueryConfig,
    /// Payload normalization.
    pub ingestion: IngestionConfig,
}

impl Config {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that all sections hold usable values.
    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        self.rules.validate()?;
        self.query.validate()
    }
}

/// Detector buffer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Maximum trades kept in the statistics window.
    pub window_capacity: usize,
    /// Maximum classified events kept in history.
    pub history_capacity: usize,
    /// Seed for the message RNG; entropy-seeded when absent.
    pub rng_seed: Option<u64>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_capacity: 1000,
            history_capacity: 10000,
            rng_seed: None,
        }
    }
}

impl DetectorConfig {
    fn validate(&self) -> Result<()> {
        if self.window_capacity == 0 {
            return Err(Error::config("detector.window_capacity must be > 0"));
        }
        if self.history_capacity == 0 {
            return Err(Error::config("detector.history_capacity must be > 0"));
        }
        Ok(())
    }
}

/// Classifier thresholds, in rule priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Trades below this quantity are dust and never classified.
    pub noise_floor_qty: f64,
    /// Huge fish: quantity must exceed this multiple of the median.
    pub huge_median_multiple: f64,
    /// Huge fish: quantity must also exceed this absolute size.
    pub huge_min_qty: f64,
    /// Leverage fish: minimum leverage.
    pub leverage_min: f64,
    /// Leverage fish: quantity must exceed this multiple of the median.
    pub leverage_median_multiple: f64,
    /// Pump/dump: relative price move over the lookback.
    pub move_ratio: f64,
    /// Pump/dump: lookback in seconds.
    pub move_lookback_secs: i64,
    /// Pump/dump: quantity must exceed this multiple of the median.
    pub move_median_multiple: f64,
    /// Night whale: first night hour (UTC, inclusive).
    pub night_start_hour: u32,
    /// Night whale: last night hour (UTC, inclusive).
    pub night_end_hour: u32,
    /// Night whale: quantity must exceed this multiple of the median.
    pub night_median_multiple: f64,
    /// High roller: high/low lookback in seconds.
    pub range_lookback_secs: i64,
    /// High roller: price at or above `high * range_high_band`.
    pub range_high_band: f64,
    /// High roller: price at or below `low * range_low_band`.
    pub range_low_band: f64,
    /// High roller: quantity must exceed this multiple of the median.
    pub range_median_multiple: f64,
    /// Cluster fish: burst period in seconds.
    pub cluster_period_secs: i64,
    /// Cluster fish: burst volume must exceed this multiple of the median.
    pub cluster_median_multiple: f64,
    /// Cluster fish: median must exceed this size.
    pub cluster_min_median: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            noise_floor_qty: 0.066,
            huge_median_multiple: 20.0,
            huge_min_qty: 1.0,
            leverage_min: 20.0,
            leverage_median_multiple: 2.0,
            move_ratio: 0.02,
            move_lookback_secs: 300,
            move_median_multiple: 3.0,
            night_start_hour: 0,
            night_end_hour: 5,
            night_median_multiple: 5.0,
            range_lookback_secs: 600,
            range_high_band: 0.99,
            range_low_band: 1.01,
            range_median_multiple: 3.0,
            cluster_period_secs: 10,
            cluster_median_multiple: 30.0,
            cluster_min_median: 0.05,
        }
    }
}

impl RulesConfig {
    fn validate(&self) -> Result<()> {
        let non_negative = [
            ("noise_floor_qty", self.noise_floor_qty),
            ("huge_median_multiple", self.huge_median_multiple),
            ("huge_min_qty", self.huge_min_qty),
            ("leverage_min", self.leverage_min),
            ("leverage_median_multiple", self.leverage_median_multiple),
            ("move_ratio", self.move_ratio),
            ("move_median_multiple", self.move_median_multiple),
            ("night_median_multiple", self.night_median_multiple),
            ("range_high_band", self.range_high_band),
            ("range_low_band", self.range_low_band),
            ("range_median_multiple", self.range_median_multiple),
            ("cluster_median_multiple", self.cluster_median_multiple),
            ("cluster_min_median", self.cluster_min_median),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::config(format!(
                    "rules.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let lookbacks = [
            ("move_lookback_secs", self.move_lookback_secs),
            ("range_lookback_secs", self.range_lookback_secs),
            ("cluster_period_secs", self.cluster_period_secs),
        ];
        for (name, value) in lookbacks {
            if value < 0 {
                return Err(Error::config(format!("rules.{} must be >= 0, got {}", name, value)));
            }
        }

        if self.night_end_hour > 23 || self.night_start_hour > self.night_end_hour {
            return Err(Error::config(format!(
                "rules night hours must satisfy start <= end <= 23, got {}..={}",
                self.night_start_hour, self.night_end_hour
            )));
        }
        Ok(())
    }
}

/// Defaults and bounds applied to query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Lookback for the "check fish" query (seconds).
    pub check_default_secs: i64,
    /// Lookback for the history query (minutes).
    pub history_default_minutes: i64,
    /// Lookback for the shark advice query (minutes).
    pub advice_default_minutes: i64,
    /// Largest accepted minute lookback.
    pub max_minutes: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            check_default_secs: 10,
            history_default_minutes: 5,
            advice_default_minutes: 3,
            max_minutes: 60,
        }
    }
}

impl QueryConfig {
    fn validate(&self) -> Result<()> {
        if self.check_default_secs <= 0 {
            return Err(Error::config("query.check_default_secs must be > 0"));
        }
        if self.max_minutes <= 0 {
            return Err(Error::config("query.max_minutes must be > 0"));
        }
        for (name, value) in [
            ("history_default_minutes", self.history_default_minutes),
            ("advice_default_minutes", self.advice_default_minutes),
        ] {
            if value <= 0 || value > self.max_minutes {
                return Err(Error::config(format!(
                    "query.{} must be within 1..={}, got {}",
                    name, self.max_minutes, value
                )));
            }
        }
        Ok(())
    }
}

/// Trade payload normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Leverage assigned to trades whose payload carries none.
    pub default_leverage: f64,
    /// Only accept trades for this symbol (case-insensitive) when set.
    pub symbol: Option<String>,
}
