//! Market configuration and aggregate statistics.

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one market's reward parameters.
///
/// Produced from upstream market data; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub id: String,
    pub question: String,
    /// Current fair-value probability of the YES outcome (0-1).
    pub midpoint: Decimal,
    /// Maximum distance from the midpoint, in probability points, that
    /// still earns reward.
    pub max_spread: Decimal,
    /// Minimum resting size per side to qualify for rewards.
    pub min_size: Decimal,
    /// Daily reward budget for this market, in currency units.
    pub reward_pool: Decimal,
}

impl MarketConfig {
    /// Check the structural invariants the engine cannot reason without.
    ///
    /// Data-quality problems (no volume, no orders) are not errors; a
    /// nonsensical spread window or probability is.
    pub fn validate(&self) -> Result<()> {
        if self.max_spread <= Decimal::ZERO {
            return Err(Error::InvalidMarket(format!(
                "max_spread must be positive, got {}",
                self.max_spread
            )));
        }
        if self.midpoint < Decimal::ZERO || self.midpoint > Decimal::ONE {
            return Err(Error::InvalidMarket(format!(
                "midpoint must be within [0, 1], got {}",
                self.midpoint
            )));
        }
        if self.min_size < Decimal::ZERO {
            return Err(Error::InvalidMarket(format!(
                "min_size must not be negative, got {}",
                self.min_size
            )));
        }
        if self.reward_pool < Decimal::ZERO {
            return Err(Error::InvalidMarket(format!(
                "reward_pool must not be negative, got {}",
                self.reward_pool
            )));
        }
        Ok(())
    }

    /// The price window that earns reward, intersected with the [0, 1]
    /// price domain. Midpoints near the extremes narrow naturally; no
    /// special-case branch is needed.
    pub fn spread_window(&self) -> (Decimal, Decimal) {
        let lower = (self.midpoint - self.max_spread).max(Decimal::ZERO);
        let upper = (self.midpoint + self.max_spread).min(Decimal::ONE);
        (lower, upper)
    }
}

/// Aggregate market statistics used when full order-book data is
/// unavailable or too costly to fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStats {
    pub volume_24h: Decimal,
    pub liquidity: Decimal,
}
