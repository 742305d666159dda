//! Reward Engine Library
//!
//! Liquidity reward scoring and order placement optimization for
//! prediction markets: reproduces the exchange's q-score formula,
//! projects reward share against estimated competition, and recommends
//! two-sided placements (a fixed safe form and a risk-adjusted search).
//!
//! Every function here is synchronous, stateless, and side-effect-free;
//! inputs are immutable value objects and outputs are freshly allocated.

pub mod competition;
pub mod dynamic;
pub mod placement;
pub mod reward;
pub mod scoring;
pub mod volatility;

pub use competition::{CompetitionEstimator, CompetitionLevel};
pub use dynamic::{DynamicOptions, DynamicPlacementOptimizer};
pub use placement::{
    PlacementStrategy, PlacementSuggestion, RiskMetrics, StaticPlacementOptimizer,
};
pub use reward::{estimate_reward, RewardEstimate};
pub use scoring::{score_orders, spread_score, ScoreResult};
pub use volatility::{fill_probability, volatility_score, DEFAULT_VOLATILITY_SCORE};
