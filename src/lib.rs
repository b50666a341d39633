//! hashrate-scout: Discount scanner for secondary-market hashrate NFT listings
//!
//! This library provides the core components for:
//! - Extracting listings from text pasted from the marketplace
//! - Primary-market reference pricing by hashrate
//! - Normalizing miners to a 15 W/TH efficiency baseline
//! - Discount calculation and opportunity ranking
//! - Structured logging and counters

pub mod cli;
pub mod config;
pub mod economics;
pub mod listing;
pub mod model;
pub mod pipeline;
pub mod telemetry;

pub use economics::{EconomicsEngine, MetricsRecord};
pub use listing::{Extractor, ListingRecord};
pub use model::{PriceSchedule, ReferencePriceModel};
pub use pipeline::{AnalysisOutcome, Pipeline};
