//! Marketplace text extractor
//!
//! The pasted text holds one listing per paragraph. Each paragraph is scanned
//! independently for:
//! - hashrate: `177 TH`, `163,22 TH`, `177THs`
//! - efficiency: `28 W/TH`
//! - total price: `$1,366.59`
//! - price per TH: `$7.72 / TH`
//! - declared ROI: `ROI 27.43%`, `ROI:\n27.43 %`
//! - NFT id: `#7128`
//!
//! Paragraphs missing hashrate, efficiency or both prices are dropped, as are
//! paragraphs whose derived price does not fit in a `Decimal`. Nothing
//! here fails: bad input yields fewer (or zero) listings.

use super::number::parse_number;
use super::types::{ListingRecord, SkipReason, SkippedSegment};
use crate::config::ExtractionConfig;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::LazyLock;
use uuid::Uuid;

pub(crate) const FALLBACK_ID_PREFIX: &str = "UNKNOWN_";

/// Two or more line breaks, optionally separated by blank-looking lines
static SEGMENT_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n[ \t]*){2,}").unwrap());

static CAPACITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)*)\s*TH").unwrap());

static EFFICIENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)*)\s*W\s*/\s*TH\b").unwrap());

/// Group 2 is present when the amount is quoted per TH
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\$\s*(\d+(?:[.,]\d+)*)(\s*/\s*TH\b)?").unwrap());

static DECLARED_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bROI[:\s]*(\d+(?:[.,]\d+)*)\s*%").unwrap());

static LISTING_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)").unwrap());

/// Diagnostic hook for extraction
///
/// Receives every listing and every dropped segment. Implementations must not
/// influence the result.
pub trait ExtractionObserver: Send + Sync {
    /// A segment parsed into a listing
    fn on_listing(&self, _index: usize, _listing: &ListingRecord) {}

    /// A non-empty segment was dropped
    fn on_skipped(&self, _index: usize, _reason: SkipReason, _segment: &str) {}
}

/// Observer that forwards diagnostics to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_listing(&self, index: usize, listing: &ListingRecord) {
        tracing::debug!(
            segment = index,
            id = %listing.id,
            capacity_th = %listing.capacity_units,
            efficiency_w_th = %listing.efficiency_per_unit,
            price_usd = %listing.price_total,
            price_per_th = %listing.price_per_unit,
            roi = ?listing.declared_return_pct,
            "Parsed listing"
        );
    }

    fn on_skipped(&self, index: usize, reason: SkipReason, segment: &str) {
        tracing::debug!(
            segment = index,
            reason = ?reason,
            length = segment.len(),
            "Skipped segment"
        );
    }
}

/// Result of one extraction call
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Listings in input order
    pub listings: Vec<ListingRecord>,
    /// Non-empty segments that yielded no listing
    pub skipped: Vec<SkippedSegment>,
}

impl ExtractionReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of non-empty segments seen
    pub fn segment_count(&self) -> usize {
        self.listings.len() + self.skipped.len()
    }
}

/// Parses pasted marketplace text into listings
pub struct Extractor {
    max_capacity: Decimal,
    observer: Box<dyn ExtractionObserver>,
}

impl Extractor {
    /// Default hashrate sanity ceiling in TH
    pub const DEFAULT_MAX_CAPACITY: Decimal = dec!(5000);

    /// Create an extractor with the default ceiling and tracing diagnostics
    pub fn new() -> Self {
        Self {
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
            observer: Box::new(TracingObserver),
        }
    }

    /// Create from ExtractionConfig
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_capacity: config.max_capacity,
            ..Self::new()
        }
    }

    /// Replace the diagnostic observer
    pub fn with_observer(mut self, observer: impl ExtractionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Extract all listings from `text`
    pub fn extract(&self, text: &str) -> Vec<ListingRecord> {
        self.extract_with_report(text).listings
    }

    /// Extract listings and account for every dropped segment
    pub fn extract_with_report(&self, text: &str) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        let segments = SEGMENT_BREAK
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty());

        for (index, segment) in segments.enumerate() {
            match self.parse_segment(segment) {
                Ok(listing) => {
                    self.observer.on_listing(index, &listing);
                    report.listings.push(listing);
                }
                Err(reason) => {
                    self.observer.on_skipped(index, reason, segment);
                    report.skipped.push(SkippedSegment { index, reason });
                }
            }
        }

        report
    }

    fn parse_segment(&self, segment: &str) -> Result<ListingRecord, SkipReason> {
        let capacity_units =
            first_number(&CAPACITY, segment).ok_or(SkipReason::MissingCapacity)?;
        if capacity_units <= Decimal::ZERO || capacity_units > self.max_capacity {
            return Err(SkipReason::CapacityOutOfRange);
        }

        let efficiency_per_unit =
            first_number(&EFFICIENCY, segment).ok_or(SkipReason::MissingEfficiency)?;
        if efficiency_per_unit <= Decimal::ZERO {
            return Err(SkipReason::NonPositiveEfficiency);
        }

        let (total, per_unit) = scan_prices(segment);
        let (price_total, price_per_unit) = match (total, per_unit) {
            (Some(total), Some(per_unit)) => (total, per_unit),
            (Some(total), None) => (
                total,
                total
                    .checked_div(capacity_units)
                    .ok_or(SkipReason::PriceOutOfRange)?,
            ),
            (None, Some(per_unit)) => (
                per_unit
                    .checked_mul(capacity_units)
                    .ok_or(SkipReason::PriceOutOfRange)?,
                per_unit,
            ),
            (None, None) => return Err(SkipReason::MissingPrice),
        };

        let declared_return_pct = first_number(&DECLARED_RETURN, segment);

        let id = LISTING_ID
            .captures(segment)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(fallback_id);

        Ok(ListingRecord {
            id,
            capacity_units,
            efficiency_per_unit,
            price_total,
            price_per_unit,
            declared_return_pct,
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn first_number(pattern: &Regex, segment: &str) -> Option<Decimal> {
    pattern
        .captures(segment)
        .and_then(|caps| parse_number(&caps[1]))
}

/// First total price and first per-TH price in the segment
fn scan_prices(segment: &str) -> (Option<Decimal>, Option<Decimal>) {
    let mut total = None;
    let mut per_unit = None;

    for caps in PRICE.captures_iter(segment) {
        let slot = if is_per_unit(&caps) {
            &mut per_unit
        } else {
            &mut total
        };
        if slot.is_none() {
            *slot = parse_number(&caps[1]);
        }
        if total.is_some() && per_unit.is_some() {
            break;
        }
    }

    (total, per_unit)
}

fn is_per_unit(caps: &Captures<'_>) -> bool {
    caps.get(2).is_some()
}

fn fallback_id() -> String {
    format!("{}{}", FALLBACK_ID_PREFIX, Uuid::new_v4().simple())
}
