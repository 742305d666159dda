//! Market-data boundary.
//!
//! The engine never fetches anything itself; the transport layer
//! implements [`MarketDataProvider`] and the ranker pulls what it needs
//! through it. Fetches fan out with a bounded concurrency window and a
//! short pause between batches so upstream rate limits are respected.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use market_core::types::{MarketStats, Order};
use tracing::warn;

/// Read-only access to per-market data owned by the transport layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Aggregate 24h statistics for one market.
    async fn market_stats(&self, market_id: &str) -> anyhow::Result<MarketStats>;

    /// The full set of other providers' resting orders, for exact
    /// competition scoring.
    async fn competitor_orders(&self, market_id: &str) -> anyhow::Result<Vec<Order>>;
}

/// Fetch stats for many markets in batches of `fetch_concurrency`,
/// sleeping `batch_delay` between batches.
///
/// Individual failures are logged and skipped; a market without stats
/// simply drops out of the ranking.
pub async fn fetch_stats_batched(
    provider: &dyn MarketDataProvider,
    market_ids: &[String],
    fetch_concurrency: usize,
    batch_delay: Duration,
) -> DashMap<String, MarketStats> {
    let results = DashMap::new();
    let width = fetch_concurrency.max(1);

    for (batch_index, chunk) in market_ids.chunks(width).enumerate() {
        if batch_index > 0 && !batch_delay.is_zero() {
            tokio::time::sleep(batch_delay).await;
        }

        let fetches = chunk.iter().map(|id| {
            let results = &results;
            async move {
                match provider.market_stats(id).await {
                    Ok(stats) => {
                        results.insert(id.clone(), stats);
                    }
                    Err(error) => {
                        warn!(market_id = %id, %error, "Failed to fetch market stats; skipping");
                    }
                }
            }
        });
        futures_util::future::join_all(fetches).await;
    }

    results
}
