//! Competing-liquidity estimation.
//!
//! Two modes: exact (score the competitors' actual resting orders) and a
//! heuristic fallback derived from aggregate market statistics for when
//! fetching every competitor's orders is too expensive. Exact mode is
//! always preferred when the data is available; the fallback exists so
//! the ranker can process many markets cheaply.

use market_core::config::CompetitionConfig;
use market_core::types::{MarketConfig, MarketStats, Order};
use market_core::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::{decimal_to_f64, score_orders};

/// Discrete competition tier for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    const LOW_CEILING: f64 = 50.0;
    const MEDIUM_CEILING: f64 = 200.0;

    /// Classify a total competing q-min score into a tier.
    pub fn classify(total_q_min: f64) -> Self {
        if total_q_min < Self::LOW_CEILING {
            Self::Low
        } else if total_q_min < Self::MEDIUM_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Estimator for the total q-min other providers have achieved.
#[derive(Debug, Clone, Default)]
pub struct CompetitionEstimator {
    config: CompetitionConfig,
}

impl CompetitionEstimator {
    /// Create an estimator with default calibration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom calibration constants.
    pub fn with_config(config: CompetitionConfig) -> Self {
        Self { config }
    }

    /// Exact mode: score the competitors' actual orders and take the
    /// resulting binding q-min directly.
    pub fn exact(&self, competitor_orders: &[Order], market: &MarketConfig) -> Result<f64> {
        Ok(score_orders(competitor_orders, market)?.q_min)
    }

    /// Heuristic fallback: estimate total competition from aggregate
    /// statistics via capped normalized factors times an assumed average
    /// per-provider score.
    ///
    /// This is empirical calibration, not the exchange's formula; treat
    /// the output as a rough prior.
    pub fn heuristic(&self, stats: &MarketStats, market: &MarketConfig) -> f64 {
        let cfg = &self.config;

        let liquidity_factor =
            (decimal_to_f64(stats.liquidity) / cfg.liquidity_divisor).clamp(0.0, cfg.liquidity_cap);
        let volume_factor =
            (decimal_to_f64(stats.volume_24h) / cfg.volume_divisor).clamp(0.0, cfg.volume_cap);
        let pool_factor =
            (decimal_to_f64(market.reward_pool) / cfg.pool_divisor).clamp(0.0, cfg.pool_cap);

        let estimate = (liquidity_factor + volume_factor + pool_factor) * cfg.avg_provider_score;

        debug!(
            market_id = %market.id,
            liquidity_factor,
            volume_factor,
            pool_factor,
            estimate,
            "Heuristic competition estimate"
        );

        estimate
    }
}
