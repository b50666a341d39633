//! Extraction and analysis in one pass
//!
//! Keeps "nothing parsed" and "nothing worth buying" apart so callers can
//! report them differently.

use crate::config::{AnalysisConfig, Config};
use crate::economics::{EconomicsEngine, MetricsRecord, TariffError, UpgradeTariff};
use crate::listing::{ExtractionReport, Extractor};
use crate::model::{PriceSchedule, ReferencePriceModel, ScheduleError};
use crate::telemetry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Outcome of analyzing one pasted text
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// The text held no parseable listing
    NoListings { skipped: usize },
    /// Listings were parsed but none qualified
    NoOpportunities { analyzed: usize, skipped: usize },
    /// Ranked opportunities, best discount first
    Opportunities {
        analyzed: usize,
        skipped: usize,
        ranked: Vec<MetricsRecord>,
    },
}

impl AnalysisOutcome {
    /// Ranked opportunities, empty unless `Opportunities`
    pub fn opportunities(&self) -> &[MetricsRecord] {
        match self {
            Self::Opportunities { ranked, .. } => ranked,
            _ => &[],
        }
    }

    pub fn analyzed(&self) -> usize {
        match self {
            Self::NoListings { .. } => 0,
            Self::NoOpportunities { analyzed, .. } | Self::Opportunities { analyzed, .. } => {
                *analyzed
            }
        }
    }
}

/// Outcome with the time it was produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

/// Invalid pricing or tariff configuration
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid price schedule: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("invalid upgrade tariff: {0}")]
    Tariff(#[from] TariffError),
}

/// Extractor plus economics engine
pub struct Pipeline<M: ReferencePriceModel> {
    extractor: Extractor,
    engine: EconomicsEngine<M>,
}

impl<M: ReferencePriceModel> Pipeline<M> {
    pub fn new(extractor: Extractor, engine: EconomicsEngine<M>) -> Self {
        Self { extractor, engine }
    }

    pub fn engine(&self) -> &EconomicsEngine<M> {
        &self.engine
    }

    /// Extract listings from `text` and rank the opportunities
    pub fn run(&self, text: &str, config: &AnalysisConfig) -> AnalysisOutcome {
        let ExtractionReport { listings, skipped } = self.extractor.extract_with_report(text);
        let skipped = skipped.len();
        telemetry::record_extraction(listings.len(), skipped);

        if listings.is_empty() {
            tracing::info!(skipped, "No listings found in text");
            return AnalysisOutcome::NoListings { skipped };
        }

        let ranked = self.engine.analyze(&listings, config);
        telemetry::record_opportunities(ranked.len());

        tracing::info!(
            listings = listings.len(),
            skipped,
            opportunities = ranked.len(),
            "Analysis complete"
        );

        if ranked.is_empty() {
            AnalysisOutcome::NoOpportunities {
                analyzed: listings.len(),
                skipped,
            }
        } else {
            AnalysisOutcome::Opportunities {
                analyzed: listings.len(),
                skipped,
                ranked,
            }
        }
    }

    /// Same as [`Pipeline::run`], stamped with the current time
    pub fn report(&self, text: &str, config: &AnalysisConfig) -> AnalysisReport {
        AnalysisReport {
            generated_at: Utc::now(),
            outcome: self.run(text, config),
        }
    }
}

impl Pipeline<PriceSchedule> {
    /// Build from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let schedule = PriceSchedule::from_config(&config.pricing)?;
        let tariff = UpgradeTariff::from_config(&config.normalization)?;
        Ok(Self::new(
            Extractor::from_config(&config.extraction),
            EconomicsEngine::new(schedule, tariff),
        ))
    }
}

impl Default for Pipeline<PriceSchedule> {
    fn default() -> Self {
        Self::new(Extractor::new(), EconomicsEngine::default())
    }
}
