//! Listing economics
//!
//! Per listing:
//! 1. normalization cost from the upgrade tariff
//! 2. normalized price and price per TH
//! 3. reference price per TH from the pricing model
//! 4. discount = (normalized - reference) / reference * 100
//! 5. opportunity = discount < 0, hashrate >= min, declared ROI (if any) >= min
//!
//! Arithmetic saturates at the `Decimal` bounds. A zero or negative hashrate
//! or reference price never yields an opportunity.

use super::tariff::UpgradeTariff;
use super::types::MetricsRecord;
use crate::config::AnalysisConfig;
use crate::listing::ListingRecord;
use crate::model::{PriceSchedule, ReferencePriceModel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Computes metrics and ranks opportunities
pub struct EconomicsEngine<M: ReferencePriceModel> {
    model: M,
    tariff: UpgradeTariff,
}

impl<M: ReferencePriceModel> EconomicsEngine<M> {
    /// Create an engine with a pricing model and upgrade tariff
    pub fn new(model: M, tariff: UpgradeTariff) -> Self {
        Self { model, tariff }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Compare one listing against the primary market
    pub fn compute_metrics(&self, listing: &ListingRecord, config: &AnalysisConfig) -> MetricsRecord {
        let capacity = listing.capacity_units;

        let normalization_cost = self
            .tariff
            .upgrade_cost(capacity, listing.efficiency_per_unit);
        let normalized_price = listing.price_total.saturating_add(normalization_cost);
        let normalized_price_per_unit = saturating_div(normalized_price, capacity);
        let reference_price_per_unit = self.model.reference_price(capacity);
        let discount_pct = saturating_div(
            normalized_price_per_unit.saturating_sub(reference_price_per_unit),
            reference_price_per_unit,
        )
        .saturating_mul(dec!(100));

        let meets_return = listing
            .declared_return_pct
            .map_or(true, |roi| roi >= config.min_declared_return);
        let is_opportunity = discount_pct < Decimal::ZERO
            && capacity > Decimal::ZERO
            && reference_price_per_unit > Decimal::ZERO
            && capacity >= config.min_capacity
            && meets_return;

        MetricsRecord {
            listing: listing.clone(),
            normalization_cost,
            normalized_price,
            normalized_price_per_unit,
            reference_price_per_unit,
            discount_pct,
            is_opportunity,
        }
    }

    /// Keep opportunities, largest discount first, at most `max_results`
    ///
    /// Ties keep their input order.
    pub fn rank_opportunities(
        &self,
        metrics: Vec<MetricsRecord>,
        config: &AnalysisConfig,
    ) -> Vec<MetricsRecord> {
        let mut ranked: Vec<MetricsRecord> =
            metrics.into_iter().filter(|m| m.is_opportunity).collect();
        // sort_by is stable
        ranked.sort_by(|a, b| a.discount_pct.cmp(&b.discount_pct));
        ranked.truncate(config.max_results);
        ranked
    }

    /// Metrics for every listing, in input order
    pub fn compute_all(
        &self,
        listings: &[ListingRecord],
        config: &AnalysisConfig,
    ) -> Vec<MetricsRecord> {
        listings
            .iter()
            .map(|listing| self.compute_metrics(listing, config))
            .collect()
    }

    /// Metrics plus ranking in one call
    pub fn analyze(&self, listings: &[ListingRecord], config: &AnalysisConfig) -> Vec<MetricsRecord> {
        let ranked = self.rank_opportunities(self.compute_all(listings, config), config);

        tracing::debug!(
            listings = listings.len(),
            opportunities = ranked.len(),
            "Analyzed listings"
        );

        ranked
    }
}

/// Division pinned to the `Decimal` range; dividing by zero reads as `MAX`
fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::MAX;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

impl Default for EconomicsEngine<PriceSchedule> {
    fn default() -> Self {
        Self::new(PriceSchedule::default(), UpgradeTariff::default())
    }
}
