//! Risk-adjusted placement search.
//!
//! The only component that searches rather than computes a closed form:
//! it sweeps a grid of candidate spread ratios, prices each candidate's
//! expected reward against fill risk and recent volatility, and picks
//! the best risk-adjusted objective. Ties within tolerance resolve to
//! the wider spread.

use market_core::config::OptimizerConfig;
use market_core::types::{MarketConfig, PriceHistory};
use market_core::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::placement::{assemble_strategy, build_two_sided, PlacementStrategy, RiskMetrics};
use crate::reward::estimate_reward;
use crate::scoring::decimal_to_f64;
use crate::volatility::{fill_probability, volatility_score, DEFAULT_VOLATILITY_SCORE};

/// Caller-supplied risk parameters for the dynamic search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DynamicOptions {
    /// Horizon the expected value is projected over; also the lookback
    /// window for volatility.
    pub time_horizon_days: f64,
    /// Tightest spread ratio the search may choose.
    pub min_spread_ratio: f64,
    /// Widest spread ratio the search may choose.
    pub max_spread_ratio: f64,
}

impl Default for DynamicOptions {
    fn default() -> Self {
        Self {
            time_horizon_days: 7.0,
            min_spread_ratio: 0.3,
            max_spread_ratio: 0.9,
        }
    }
}

impl DynamicOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.time_horizon_days > 0.0) {
            return Err(Error::InvalidArgument {
                message: format!(
                    "time_horizon_days must be positive, got {}",
                    self.time_horizon_days
                ),
            });
        }
        if !(self.min_spread_ratio > 0.0 && self.min_spread_ratio <= 1.0)
            || !(self.max_spread_ratio > 0.0 && self.max_spread_ratio <= 1.0)
        {
            return Err(Error::InvalidArgument {
                message: format!(
                    "spread ratios must lie in (0, 1], got [{}, {}]",
                    self.min_spread_ratio, self.max_spread_ratio
                ),
            });
        }
        if self.min_spread_ratio > self.max_spread_ratio {
            return Err(Error::InvalidArgument {
                message: format!(
                    "min_spread_ratio {} exceeds max_spread_ratio {}",
                    self.min_spread_ratio, self.max_spread_ratio
                ),
            });
        }
        Ok(())
    }
}

struct Candidate {
    ratio: f64,
    placement: crate::placement::TwoSidedPlacement,
    fill: f64,
    expected_value: f64,
    objective: f64,
}

/// Grid-search optimizer over the feasible spread range.
#[derive(Debug, Clone, Default)]
pub struct DynamicPlacementOptimizer {
    config: OptimizerConfig,
}

impl DynamicPlacementOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Search `[min_spread_ratio, max_spread_ratio]` for the placement
    /// maximizing expected reward discounted by fill risk.
    ///
    /// Missing or too-short price history is not an error; the
    /// volatility score falls back to mid-range and the search still
    /// runs. Hard errors are reserved for invalid market configuration,
    /// negative capital, and malformed options.
    pub fn optimize(
        &self,
        capital: Decimal,
        market: &MarketConfig,
        competition_q_min: f64,
        history: Option<&PriceHistory>,
        options: &DynamicOptions,
    ) -> Result<PlacementStrategy> {
        market.validate()?;
        options.validate()?;
        if capital < Decimal::ZERO {
            return Err(Error::InvalidArgument {
                message: format!("capital must not be negative, got {}", capital),
            });
        }

        let volatility = history
            .and_then(|h| volatility_score(h, options.time_horizon_days))
            .unwrap_or(DEFAULT_VOLATILITY_SCORE);
        let vol_fraction = volatility / 100.0;
        // Being filled hurts more when the market is moving.
        let inventory_risk_weight = 0.5 + 0.5 * vol_fraction;

        let steps = self.config.candidate_count.max(2);
        let span = options.max_spread_ratio - options.min_spread_ratio;
        let pool = decimal_to_f64(market.reward_pool);

        // Walk widest-first so that ties within tolerance keep the
        // wider, lower-fill-risk spread.
        let mut best: Option<Candidate> = None;
        for i in (0..steps).rev() {
            let t = i as f64 / (steps - 1) as f64;
            // Clamp so accumulated rounding can never step outside the
            // caller's bounds.
            let ratio = (options.min_spread_ratio + t * span)
                .clamp(options.min_spread_ratio, options.max_spread_ratio);

            let placement = build_two_sided(capital, market, ratio)?;
            let total_q_min = competition_q_min.max(0.0) + placement.q_min;
            let estimate = estimate_reward(
                placement.q_min,
                total_q_min,
                pool,
                decimal_to_f64(placement.total_capital()),
            );

            let fill = fill_probability(ratio, volatility);
            let expected_value = estimate.daily_reward * options.time_horizon_days;
            let objective = expected_value * (1.0 - fill * inventory_risk_weight);

            let improves = match &best {
                None => true,
                Some(current) => objective > current.objective + self.config.tie_tolerance,
            };
            if improves {
                best = Some(Candidate {
                    ratio,
                    placement,
                    fill,
                    expected_value,
                    objective,
                });
            }
        }

        // steps >= 2 guarantees at least one candidate.
        let Some(chosen) = best else {
            return Err(Error::InvalidArgument {
                message: "candidate grid produced no placements".to_string(),
            });
        };

        debug!(
            market_id = %market.id,
            ratio = chosen.ratio,
            objective = chosen.objective,
            volatility,
            "Dynamic placement selected"
        );

        let risk = RiskMetrics {
            fill_probability: chosen.fill,
            volatility_score: volatility,
            expected_value: chosen.expected_value,
            risk_adjusted_return: chosen.objective,
            optimal_spread_ratio: chosen.ratio,
        };

        let (strategy, _) =
            assemble_strategy(chosen.placement, market, competition_q_min, capital, Some(risk));
        Ok(strategy)
    }
}
