//! Configuration types for hashrate-scout

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Opportunity thresholds and result size
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Smallest hashrate (TH) worth reporting
    #[serde(default = "default_min_capacity")]
    pub min_capacity: Decimal,

    /// Minimum declared ROI percentage, checked only when a listing declares one
    #[serde(default = "default_min_declared_return")]
    pub min_declared_return: Decimal,

    /// Maximum number of ranked opportunities
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_min_capacity() -> Decimal {
    Decimal::new(10, 0)
}
fn default_min_declared_return() -> Decimal {
    Decimal::new(20, 0)
}
fn default_max_results() -> usize {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_capacity: Decimal::new(10, 0),
            min_declared_return: Decimal::new(20, 0),
            max_results: 5,
        }
    }
}

/// Invalid analysis thresholds
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("min_capacity must not be negative: {0}")]
    NegativeMinCapacity(Decimal),
    #[error("min_declared_return must not be negative: {0}")]
    NegativeMinReturn(Decimal),
    #[error("max_results must be at least 1")]
    ZeroMaxResults,
}

impl AnalysisConfig {
    /// Check thresholds before they reach the economics engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_capacity < Decimal::ZERO {
            return Err(ConfigError::NegativeMinCapacity(self.min_capacity));
        }
        if self.min_declared_return < Decimal::ZERO {
            return Err(ConfigError::NegativeMinReturn(self.min_declared_return));
        }
        if self.max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }
        Ok(())
    }
}

/// Text extraction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Hashrate sanity ceiling in TH; larger values are treated as parse errors
    #[serde(default = "default_max_capacity")]
    pub max_capacity: Decimal,
}

fn default_max_capacity() -> Decimal {
    Decimal::new(5000, 0)
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_capacity: Decimal::new(5000, 0),
        }
    }
}

/// Primary-market price schedule override
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Replaces the built-in schedule when non-empty
    #[serde(default)]
    pub anchors: Vec<AnchorConfig>,
}

/// One (TH, USD/TH) point of the primary-market schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnchorConfig {
    pub capacity: Decimal,
    pub price_per_unit: Decimal,
}

/// Efficiency upgrade tariff override
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NormalizationConfig {
    /// Replaces the built-in tariff when non-empty
    #[serde(default)]
    pub bands: Vec<BandConfig>,
}

/// Cost per TH of each W/TH step at or above `min_efficiency`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BandConfig {
    pub min_efficiency: Decimal,
    pub cost_per_unit: Decimal,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormatConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    #[default]
    Pretty,
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormatConfig::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
