//! Price command implementation

use crate::config::Config;
use crate::model::{PriceSchedule, ReferencePriceModel};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Hashrate in TH
    pub capacity: Decimal,
}

impl PriceArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        if self.capacity <= Decimal::ZERO {
            anyhow::bail!("capacity must be positive, got {}", self.capacity);
        }

        let schedule = PriceSchedule::from_config(&config.pricing)?;
        let price = schedule.reference_price(self.capacity);

        println!(
            "{} TH: ${}/TH (${} total)",
            self.capacity,
            price.round_dp(4),
            (price * self.capacity).round_dp(2)
        );
        Ok(())
    }
}
