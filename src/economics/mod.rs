//! Economics module
//!
//! Normalizes listings to the 15 W/TH baseline, compares them against the
//! primary market and ranks the discounted ones

mod engine;
mod tariff;
mod types;

pub use engine::EconomicsEngine;
pub use tariff::{TariffBand, TariffError, UpgradeTariff, BASELINE_EFFICIENCY};
pub use types::{DiscountTier, MetricsRecord};
