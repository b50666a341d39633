//! Economics types

use crate::listing::ListingRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Comparison of one listing against the primary market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Source listing
    pub listing: ListingRecord,
    /// USD needed to bring the miner down to 15 W/TH
    pub normalization_cost: Decimal,
    /// Listed price plus normalization cost
    pub normalized_price: Decimal,
    /// Normalized price per TH
    pub normalized_price_per_unit: Decimal,
    /// Primary-market USD/TH for the same hashrate
    pub reference_price_per_unit: Decimal,
    /// Percent difference to the primary market; negative is cheaper
    pub discount_pct: Decimal,
    /// Cheaper than primary and passes the capacity/ROI thresholds
    pub is_opportunity: bool,
}

impl MetricsRecord {
    pub fn tier(&self) -> DiscountTier {
        DiscountTier::from_discount(self.discount_pct)
    }
}

/// Rating ladder for a discount percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTier {
    /// 20% or more below primary
    Exceptional,
    /// 10% to 20% below
    Great,
    /// 5% to 10% below
    Good,
    /// 1% to 5% below
    Fair,
    /// Under 1% below
    Slight,
    /// At or above primary
    NotDiscounted,
}

impl DiscountTier {
    pub fn from_discount(discount_pct: Decimal) -> Self {
        if discount_pct <= dec!(-20) {
            Self::Exceptional
        } else if discount_pct <= dec!(-10) {
            Self::Great
        } else if discount_pct <= dec!(-5) {
            Self::Good
        } else if discount_pct <= dec!(-1) {
            Self::Fair
        } else if discount_pct < Decimal::ZERO {
            Self::Slight
        } else {
            Self::NotDiscounted
        }
    }

    /// Star count, 0 for non-discounted listings
    pub fn stars(&self) -> u8 {
        match self {
            Self::Exceptional => 5,
            Self::Great => 4,
            Self::Good => 3,
            Self::Fair => 2,
            Self::Slight => 1,
            Self::NotDiscounted => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional",
            Self::Great => "Great deal",
            Self::Good => "Good opportunity",
            Self::Fair => "Fair",
            Self::Slight => "Slightly discounted",
            Self::NotDiscounted => "Not discounted",
        }
    }
}
