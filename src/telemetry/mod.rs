//! Telemetry module
//!
//! Structured logging and analysis counters

mod counters;
mod logging;

pub use counters::{record_extraction, record_opportunities, CounterMetric};
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
