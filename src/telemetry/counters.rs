//! Analysis counters
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these are no-ops.

/// Counter metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Listings parsed from pasted text
    ListingsExtracted,
    /// Non-empty segments that yielded no listing
    SegmentsSkipped,
    /// Ranked opportunities returned
    Opportunities,
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::ListingsExtracted => "scout_listings_extracted_total",
            CounterMetric::SegmentsSkipped => "scout_segments_skipped_total",
            CounterMetric::Opportunities => "scout_opportunities_total",
        }
    }
}

fn increment(metric: CounterMetric, value: usize) {
    ::metrics::counter!(metric.name()).increment(value as u64);
    tracing::trace!(metric = metric.name(), value, "Recording counter");
}

/// Record the result of one extraction
pub fn record_extraction(listings: usize, skipped: usize) {
    increment(CounterMetric::ListingsExtracted, listings);
    increment(CounterMetric::SegmentsSkipped, skipped);
}

/// Record the number of ranked opportunities
pub fn record_opportunities(count: usize) {
    increment(CounterMetric::Opportunities, count);
}
