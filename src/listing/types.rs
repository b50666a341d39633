//! Listing types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A hashrate NFT listing parsed from marketplace text
///
/// Always satisfies `capacity_units > 0` and `efficiency_per_unit > 0`;
/// the extractor drops segments that would violate either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// NFT identifier (digits after `#`), or a synthesized `UNKNOWN_` id
    pub id: String,
    /// Hashrate in TH
    pub capacity_units: Decimal,
    /// Power draw in W/TH
    pub efficiency_per_unit: Decimal,
    /// Listed total price in USD
    pub price_total: Decimal,
    /// Listed price per TH in USD
    pub price_per_unit: Decimal,
    /// Self-reported ROI percentage, if the listing shows one
    pub declared_return_pct: Option<Decimal>,
}

impl ListingRecord {
    /// Whether the listing id was synthesized because the text had no `#id`
    pub fn has_fallback_id(&self) -> bool {
        self.id.starts_with(super::extractor::FALLBACK_ID_PREFIX)
    }
}

/// Why a segment produced no listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No `<number> TH` token
    MissingCapacity,
    /// Capacity was zero or above the sanity ceiling
    CapacityOutOfRange,
    /// No `<number> W/TH` token
    MissingEfficiency,
    /// Efficiency parsed as zero
    NonPositiveEfficiency,
    /// Neither a total price nor a per-TH price
    MissingPrice,
    /// Deriving the missing price overflowed
    PriceOutOfRange,
}

/// A non-empty segment that was dropped during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSegment {
    /// Position of the segment among non-empty segments
    pub index: usize,
    pub reason: SkipReason,
}
