//! Market Ranker Library
//!
//! Composes the reward engine across many markets: estimates competing
//! liquidity per market, computes an achievable placement for the
//! caller's capital, and ranks the results by capital efficiency. Also
//! owns the rate-limit-friendly batched fetch boundary through which
//! per-market data arrives.

pub mod provider;
pub mod ranker;

pub use provider::{fetch_stats_batched, MarketDataProvider};
pub use ranker::{
    MarketOpportunity, MarketOpportunityRanker, MarketSnapshot, RankOptions,
};
