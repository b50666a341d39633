//! Piecewise-linear primary-market price schedule
//!
//! Anchors are the published (TH, USD/TH) price points. Between two anchors
//! the price is interpolated linearly on TH; outside the table it is clamped
//! to the nearest anchor:
//! price(x) = p0 + (x - c0) / (c1 - c0) * (p1 - p0)

use super::ReferencePriceModel;
use crate::config::PricingConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One published point of the primary-market schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Purchased hashrate in TH
    pub capacity: Decimal,
    /// USD per TH at that hashrate
    pub price_per_unit: Decimal,
}

impl Anchor {
    pub const fn new(capacity: Decimal, price_per_unit: Decimal) -> Self {
        Self {
            capacity,
            price_per_unit,
        }
    }
}

/// Primary-market schedule used when no override is configured
const DEFAULT_ANCHORS: [Anchor; 20] = [
    Anchor::new(dec!(1), dec!(22.99)),
    Anchor::new(dec!(2), dec!(22.495)),
    Anchor::new(dec!(4), dec!(22.00)),
    Anchor::new(dec!(8), dec!(21.75)),
    Anchor::new(dec!(16), dec!(21.50)),
    Anchor::new(dec!(32), dec!(21.28)),
    Anchor::new(dec!(48), dec!(21.06)),
    Anchor::new(dec!(64), dec!(20.86)),
    Anchor::new(dec!(96), dec!(20.65)),
    Anchor::new(dec!(128), dec!(20.44)),
    Anchor::new(dec!(192), dec!(20.23)),
    Anchor::new(dec!(256), dec!(20.03)),
    Anchor::new(dec!(384), dec!(19.83)),
    Anchor::new(dec!(512), dec!(19.63)),
    Anchor::new(dec!(768), dec!(19.44)),
    Anchor::new(dec!(1024), dec!(19.25)),
    Anchor::new(dec!(1536), dec!(19.05)),
    Anchor::new(dec!(2560), dec!(18.86)),
    Anchor::new(dec!(3584), dec!(18.68)),
    Anchor::new(dec!(5000), dec!(18.49)),
];

/// Invalid anchor table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("price schedule needs at least one anchor")]
    Empty,
    #[error("anchor capacity must be positive: {0}")]
    NonPositiveCapacity(Decimal),
    #[error("anchor price must be positive: {0}")]
    NonPositivePrice(Decimal),
    #[error("anchor capacities must be strictly ascending at {0}")]
    NotAscending(Decimal),
    #[error("anchor price rises at {capacity} TH ({price} USD/TH)")]
    PriceIncreases { capacity: Decimal, price: Decimal },
}

/// Table-driven reference price model
#[derive(Debug, Clone)]
pub struct PriceSchedule {
    anchors: Vec<Anchor>,
}

impl PriceSchedule {
    /// Build a schedule from anchors sorted by ascending capacity
    pub fn new(anchors: Vec<Anchor>) -> Result<Self, ScheduleError> {
        if anchors.is_empty() {
            return Err(ScheduleError::Empty);
        }

        for anchor in &anchors {
            if anchor.capacity <= Decimal::ZERO {
                return Err(ScheduleError::NonPositiveCapacity(anchor.capacity));
            }
            if anchor.price_per_unit <= Decimal::ZERO {
                return Err(ScheduleError::NonPositivePrice(anchor.price_per_unit));
            }
        }

        for pair in anchors.windows(2) {
            if pair[1].capacity <= pair[0].capacity {
                return Err(ScheduleError::NotAscending(pair[1].capacity));
            }
            if pair[1].price_per_unit > pair[0].price_per_unit {
                return Err(ScheduleError::PriceIncreases {
                    capacity: pair[1].capacity,
                    price: pair[1].price_per_unit,
                });
            }
        }

        Ok(Self { anchors })
    }

    /// Schedule from config, falling back to the built-in table
    pub fn from_config(config: &PricingConfig) -> Result<Self, ScheduleError> {
        if config.anchors.is_empty() {
            return Ok(Self::default());
        }
        Self::new(
            config
                .anchors
                .iter()
                .map(|a| Anchor::new(a.capacity, a.price_per_unit))
                .collect(),
        )
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }
}

impl Default for PriceSchedule {
    fn default() -> Self {
        Self {
            anchors: DEFAULT_ANCHORS.to_vec(),
        }
    }
}

impl ReferencePriceModel for PriceSchedule {
    fn reference_price(&self, capacity_units: Decimal) -> Decimal {
        // First anchor at or above the requested capacity
        let idx = self
            .anchors
            .partition_point(|a| a.capacity < capacity_units);

        if idx == 0 {
            return self.anchors[0].price_per_unit;
        }
        let Some(upper) = self.anchors.get(idx) else {
            return self.anchors[self.anchors.len() - 1].price_per_unit;
        };
        if upper.capacity == capacity_units {
            return upper.price_per_unit;
        }

        let lower = &self.anchors[idx - 1];
        let ratio = (capacity_units - lower.capacity) / (upper.capacity - lower.capacity);
        lower.price_per_unit + ratio * (upper.price_per_unit - lower.price_per_unit)
    }
}
