//! LP-Optimizer: Liquidity Reward Scoring and Placement Optimization
//!
//! This is the root crate that provides benchmark and integration-test
//! access to the internal modules. For actual functionality, use the
//! individual crates directly:
//!
//! - `market-core`: domain types, errors, configuration
//! - `reward-engine`: scoring, reward estimation, placement optimizers
//! - `market-ranker`: multi-market opportunity ranking and the batched
//!   data-fetch boundary

// Re-export for benchmarks
pub use market_core as core;
pub use market_ranker as ranker;
pub use reward_engine as engine;
