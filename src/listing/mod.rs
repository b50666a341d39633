//! Listing extraction module
//!
//! Turns text pasted from the secondary marketplace into structured listings

mod extractor;
mod number;
mod types;

pub use extractor::{ExtractionObserver, ExtractionReport, Extractor, TracingObserver};
pub use types::{ListingRecord, SkipReason, SkippedSegment};
