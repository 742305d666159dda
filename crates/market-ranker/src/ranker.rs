//! Multi-market opportunity ranking.
//!
//! Composes the competition estimator and the static placement
//! optimizer across many markets to rank where a given amount of
//! capital earns the most reward per unit deployed. The ranking itself
//! is pure and synchronous over pre-fetched snapshots; the async
//! convenience wrapper pulls stats through the bounded-fetch boundary
//! first.

use std::time::Duration;

use market_core::config::{EngineConfig, RankerConfig};
use market_core::types::{MarketConfig, MarketStats, Order};
use market_core::{Error, Result};
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use reward_engine::{CompetitionEstimator, CompetitionLevel, StaticPlacementOptimizer};

use crate::provider::{fetch_stats_batched, MarketDataProvider};

/// Everything the ranker needs to know about one market.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub config: MarketConfig,
    pub stats: MarketStats,
    /// Other providers' resting orders, when the caller paid to fetch
    /// them; enables exact competition scoring.
    pub competitor_orders: Option<Vec<Order>>,
}

/// One ranked row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOpportunity {
    pub market_id: String,
    pub question: String,
    pub reward_pool: Decimal,
    pub estimated_competition: f64,
    pub estimated_daily_reward: f64,
    /// Daily reward per unit of capital; the ranking key.
    pub capital_efficiency: f64,
    pub competition_level: CompetitionLevel,
    /// Minimum capital to be competitive in this market.
    pub recommended_capital: Decimal,
}

/// Caller options for a ranking pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankOptions {
    /// Score competitor orders exactly where they were supplied,
    /// instead of the cheap heuristic.
    pub use_exact_competition: bool,
}

/// Ranks reward opportunities across markets for a capital amount.
#[derive(Debug, Clone, Default)]
pub struct MarketOpportunityRanker {
    competition: CompetitionEstimator,
    optimizer: StaticPlacementOptimizer,
    config: RankerConfig,
}

impl MarketOpportunityRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            competition: CompetitionEstimator::with_config(config.competition),
            optimizer: StaticPlacementOptimizer::with_config(config.optimizer),
            config: config.ranker,
        }
    }

    /// Rank pre-fetched market snapshots by capital efficiency.
    ///
    /// Markets whose configuration fails validation are skipped with a
    /// warning rather than failing the batch. Markets where `capital`
    /// falls below 80% of the recommended minimum are filtered out (a
    /// soft admission gate, not an error).
    pub fn rank(
        &self,
        capital: Decimal,
        snapshots: &[MarketSnapshot],
        options: &RankOptions,
    ) -> Result<Vec<MarketOpportunity>> {
        if capital < Decimal::ZERO {
            return Err(Error::InvalidArgument {
                message: format!("capital must not be negative, got {}", capital),
            });
        }

        let mut opportunities: Vec<MarketOpportunity> = snapshots
            .par_iter()
            .filter_map(|snapshot| self.evaluate(capital, snapshot, options))
            .collect();

        opportunities.sort_by(|a, b| {
            b.capital_efficiency
                .partial_cmp(&a.capital_efficiency)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(opportunities)
    }

    /// Fetch stats through the provider boundary, then rank. Heuristic
    /// competition only; this is the cheap path for scanning many markets.
    pub async fn rank_for_provider(
        &self,
        capital: Decimal,
        markets: &[MarketConfig],
        provider: &dyn MarketDataProvider,
        options: &RankOptions,
    ) -> Result<Vec<MarketOpportunity>> {
        let ids: Vec<String> = markets.iter().map(|m| m.id.clone()).collect();
        let stats = fetch_stats_batched(
            provider,
            &ids,
            self.config.fetch_concurrency,
            Duration::from_millis(self.config.batch_delay_ms),
        )
        .await;

        let snapshots: Vec<MarketSnapshot> = markets
            .iter()
            .filter_map(|market| {
                stats.get(&market.id).map(|entry| MarketSnapshot {
                    config: market.clone(),
                    stats: entry.value().clone(),
                    competitor_orders: None,
                })
            })
            .collect();

        self.rank(capital, &snapshots, options)
    }

    fn evaluate(
        &self,
        capital: Decimal,
        snapshot: &MarketSnapshot,
        options: &RankOptions,
    ) -> Option<MarketOpportunity> {
        let market = &snapshot.config;
        if let Err(error) = market.validate() {
            warn!(market_id = %market.id, %error, "Skipping invalid market");
            return None;
        }

        let estimated_competition = match (&snapshot.competitor_orders, options.use_exact_competition)
        {
            (Some(orders), true) => match self.competition.exact(orders, market) {
                Ok(total) => total,
                Err(error) => {
                    warn!(market_id = %market.id, %error, "Exact competition scoring failed");
                    return None;
                }
            },
            _ => self.competition.heuristic(&snapshot.stats, market),
        };

        let strategy = match self.optimizer.optimize(capital, market, estimated_competition) {
            Ok(strategy) => strategy,
            Err(error) => {
                warn!(market_id = %market.id, %error, "Placement failed");
                return None;
            }
        };

        let capital_f = capital.to_f64().unwrap_or(0.0);
        let capital_efficiency = if capital_f > 0.0 {
            strategy.expected_daily_reward / capital_f
        } else {
            0.0
        };

        // Capital needed to rest the market minimum on both sides.
        let min_size_capital =
            market.min_size * strategy.bid.price + market.min_size * strategy.ask.price;
        let competition_stake = Decimal::from_f64_retain(estimated_competition * 0.05)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2);
        let recommended_capital = min_size_capital.max(competition_stake);

        // Soft admission gate: under-capitalized entries would earn a
        // negligible share, so they are dropped rather than ranked last.
        let viability_floor = recommended_capital
            * Decimal::from_f64_retain(self.config.viability_ratio).unwrap_or(Decimal::ONE);
        if capital < viability_floor {
            debug!(
                market_id = %market.id,
                %capital,
                %recommended_capital,
                "Market filtered: capital below viability floor"
            );
            return None;
        }

        Some(MarketOpportunity {
            market_id: market.id.clone(),
            question: market.question.clone(),
            reward_pool: market.reward_pool,
            estimated_competition,
            estimated_daily_reward: strategy.expected_daily_reward,
            capital_efficiency,
            competition_level: CompetitionLevel::classify(estimated_competition),
            recommended_capital,
        })
    }
}
