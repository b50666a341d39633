//! Reference pricing module
//!
//! Primary-market price per TH as a function of purchased hashrate

mod schedule;

pub use schedule::{Anchor, PriceSchedule, ScheduleError};

use rust_decimal::Decimal;

/// Trait for reference price model implementations
///
/// Implementations must be total over positive capacity and non-increasing
/// in capacity (bigger purchases never cost more per TH).
pub trait ReferencePriceModel: Send + Sync {
    /// Reference USD price per TH for a purchase of `capacity_units` TH
    fn reference_price(&self, capacity_units: Decimal) -> Decimal;
}

impl<M: ReferencePriceModel + ?Sized> ReferencePriceModel for &M {
    fn reference_price(&self, capacity_units: Decimal) -> Decimal {
        (**self).reference_price(capacity_units)
    }
}
