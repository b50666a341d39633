//! Efficiency upgrade tariff
//!
//! Bringing a miner down to the 15 W/TH baseline is paid one W/TH step at a
//! time, from `ceil(efficiency)` down to 16. Each step `w` is charged per TH
//! by the band whose floor is the highest one not above `w`. Steps below
//! the lowest band are free.
//!
//! Costs saturate at `Decimal::MAX` instead of overflowing.

use crate::config::NormalizationConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Efficiency every listing is normalized to, in W/TH
pub const BASELINE_EFFICIENCY: Decimal = dec!(15);

/// Cost per TH for each W/TH step at or above `min_efficiency`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffBand {
    pub min_efficiency: Decimal,
    pub cost_per_unit: Decimal,
}

impl TariffBand {
    pub const fn new(min_efficiency: Decimal, cost_per_unit: Decimal) -> Self {
        Self {
            min_efficiency,
            cost_per_unit,
        }
    }
}

/// GoMining upgrade price list
const DEFAULT_BANDS: [TariffBand; 3] = [
    TariffBand::new(dec!(29), dec!(0.72)),
    TariffBand::new(dec!(21), dec!(1.53)),
    TariffBand::new(dec!(16), dec!(1.14)),
];

/// Invalid tariff bands
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TariffError {
    #[error("tariff needs at least one band")]
    Empty,
    #[error("band floor {0} W/TH must be above the 15 W/TH baseline")]
    FloorAtBaseline(Decimal),
    #[error("band floors must be strictly descending at {0} W/TH")]
    NotDescending(Decimal),
    #[error("band cost must not be negative: {0}")]
    NegativeCost(Decimal),
}

/// Stepped upgrade tariff
#[derive(Debug, Clone)]
pub struct UpgradeTariff {
    /// Ordered by descending floor
    bands: Vec<TariffBand>,
}

impl UpgradeTariff {
    /// Build a tariff from bands ordered by descending `min_efficiency`
    pub fn new(bands: Vec<TariffBand>) -> Result<Self, TariffError> {
        if bands.is_empty() {
            return Err(TariffError::Empty);
        }
        for band in &bands {
            if band.min_efficiency <= BASELINE_EFFICIENCY {
                return Err(TariffError::FloorAtBaseline(band.min_efficiency));
            }
            if band.cost_per_unit < Decimal::ZERO {
                return Err(TariffError::NegativeCost(band.cost_per_unit));
            }
        }
        for pair in bands.windows(2) {
            if pair[1].min_efficiency >= pair[0].min_efficiency {
                return Err(TariffError::NotDescending(pair[1].min_efficiency));
            }
        }
        Ok(Self { bands })
    }

    /// A single rate for every W/TH above baseline
    pub fn flat(cost_per_unit: Decimal) -> Result<Self, TariffError> {
        Self::new(vec![TariffBand::new(
            BASELINE_EFFICIENCY + Decimal::ONE,
            cost_per_unit,
        )])
    }

    /// Tariff from config, falling back to the built-in bands
    pub fn from_config(config: &NormalizationConfig) -> Result<Self, TariffError> {
        if config.bands.is_empty() {
            return Ok(Self::default());
        }
        Self::new(
            config
                .bands
                .iter()
                .map(|b| TariffBand::new(b.min_efficiency, b.cost_per_unit))
                .collect(),
        )
    }

    pub fn bands(&self) -> &[TariffBand] {
        &self.bands
    }

    /// Upgrade cost per TH for a miner at `efficiency` W/TH
    pub fn cost_per_unit(&self, efficiency: Decimal) -> Decimal {
        if efficiency <= BASELINE_EFFICIENCY {
            return Decimal::ZERO;
        }

        let top_step = efficiency.ceil();
        let first_step = BASELINE_EFFICIENCY + Decimal::ONE;
        let mut ceiling = top_step;
        let mut total = Decimal::ZERO;

        for band in &self.bands {
            let floor = band.min_efficiency.ceil().max(first_step);
            let steps = (ceiling - floor + Decimal::ONE).max(Decimal::ZERO);
            total = total.saturating_add(steps.saturating_mul(band.cost_per_unit));
            // Steps below this floor belong to lower bands
            ceiling = ceiling.min(floor - Decimal::ONE);
        }

        total
    }

    /// Total upgrade cost for `capacity` TH at `efficiency` W/TH
    pub fn upgrade_cost(&self, capacity: Decimal, efficiency: Decimal) -> Decimal {
        capacity.saturating_mul(self.cost_per_unit(efficiency))
    }
}

impl Default for UpgradeTariff {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandConfig;
    use std::str::FromStr;

    /// Step-by-step reference: charge each whole W/TH from the top down
    fn stepwise(tariff: &UpgradeTariff, efficiency: Decimal) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut w = efficiency.ceil();
        while w > BASELINE_EFFICIENCY {
            if let Some(band) = tariff.bands().iter().find(|b| w >= b.min_efficiency) {
                total += band.cost_per_unit;
            }
            w -= Decimal::ONE;
        }
        total
    }

    #[test]
    fn test_at_or_below_baseline_is_free() {
        let tariff = UpgradeTariff::default();
        assert_eq!(tariff.cost_per_unit(dec!(15)), dec!(0));
        assert_eq!(tariff.cost_per_unit(dec!(12.5)), dec!(0));
        assert_eq!(tariff.upgrade_cost(dec!(100), dec!(15)), dec!(0));
    }

    #[test]
    fn test_default_bands_29_w() {
        // 1 x 0.72 + 8 x 1.53 + 5 x 1.14
        assert_eq!(UpgradeTariff::default().cost_per_unit(dec!(29)), dec!(18.66));
    }

    #[test]
    fn test_default_bands_20_w() {
        assert_eq!(UpgradeTariff::default().cost_per_unit(dec!(20)), dec!(5.70));
    }

    #[test]
    fn test_fractional_efficiency_rounds_up() {
        let tariff = UpgradeTariff::default();
        assert_eq!(tariff.cost_per_unit(dec!(15.1)), dec!(1.14));
        assert_eq!(tariff.cost_per_unit(dec!(20.4)), tariff.cost_per_unit(dec!(21)));
    }

    #[test]
    fn test_matches_stepwise_reference() {
        let tariff = UpgradeTariff::default();
        let mut efficiency = dec!(14);
        while efficiency <= dec!(40) {
            assert_eq!(
                tariff.cost_per_unit(efficiency),
                stepwise(&tariff, efficiency),
                "mismatch at {} W/TH",
                efficiency
            );
            efficiency += dec!(0.5);
        }
    }

    #[test]
    fn test_flat_rate() {
        let tariff = UpgradeTariff::flat(dec!(1)).unwrap();
        assert_eq!(tariff.upgrade_cost(dec!(1000), dec!(29)), dec!(14000));
    }

    #[test]
    fn test_absurd_efficiency_saturates() {
        let tariff = UpgradeTariff::flat(dec!(2)).unwrap();
        assert_eq!(tariff.cost_per_unit(Decimal::MAX), Decimal::MAX);

        let efficiency = Decimal::from_str("1000000000000000000000000000").unwrap();
        assert_eq!(
            UpgradeTariff::default().upgrade_cost(dec!(5000), efficiency),
            Decimal::MAX
        );
    }

    #[test]
    fn test_gap_below_lowest_band_is_free() {
        let tariff = UpgradeTariff::new(vec![TariffBand::new(dec!(18), dec!(2))]).unwrap();
        assert_eq!(tariff.cost_per_unit(dec!(17)), dec!(0));
        assert_eq!(tariff.cost_per_unit(dec!(19)), dec!(4));
    }

    #[test]
    fn test_new_validation() {
        assert_eq!(UpgradeTariff::new(vec![]).unwrap_err(), TariffError::Empty);
        assert_eq!(
            UpgradeTariff::new(vec![TariffBand::new(dec!(15), dec!(1))]).unwrap_err(),
            TariffError::FloorAtBaseline(dec!(15))
        );
        assert_eq!(
            UpgradeTariff::new(vec![TariffBand::new(dec!(20), dec!(-1))]).unwrap_err(),
            TariffError::NegativeCost(dec!(-1))
        );
        assert_eq!(
            UpgradeTariff::new(vec![
                TariffBand::new(dec!(20), dec!(1)),
                TariffBand::new(dec!(25), dec!(1)),
            ])
            .unwrap_err(),
            TariffError::NotDescending(dec!(25))
        );
    }

    #[test]
    fn test_from_config() {
        let config = NormalizationConfig {
            bands: vec![BandConfig {
                min_efficiency: dec!(16),
                cost_per_unit: dec!(2),
            }],
        };
        let tariff = UpgradeTariff::from_config(&config).unwrap();
        assert_eq!(tariff.cost_per_unit(dec!(18)), dec!(6));

        let tariff = UpgradeTariff::from_config(&NormalizationConfig::default()).unwrap();
        assert_eq!(tariff.bands().len(), 3);
    }
}
