//! Integration tests for component interactions.
//!
//! These tests verify that scoring, reward estimation, the placement
//! optimizers, and the ranker work together correctly across crates.

use rust_decimal::Decimal;

use market_core::types::{MarketConfig, MarketStats, Order, Side};
use market_ranker::{MarketDataProvider, MarketOpportunityRanker, MarketSnapshot, RankOptions};
use reward_engine::{
    estimate_reward, score_orders, CompetitionEstimator, DynamicOptions,
    DynamicPlacementOptimizer, StaticPlacementOptimizer, DEFAULT_VOLATILITY_SCORE,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn reference_market() -> MarketConfig {
    MarketConfig {
        id: "reference".to_string(),
        question: "Will the reference market resolve YES?".to_string(),
        midpoint: Decimal::new(50, 2),
        max_spread: Decimal::new(5, 2),
        min_size: Decimal::new(100, 0),
        reward_pool: Decimal::new(100, 0),
    }
}

/// The worked scoring scenario: a balanced pair inside the window
/// qualifies on both sides and the binding score equals either side.
#[test]
fn test_worked_scoring_example() {
    init_tracing();
    let orders = vec![
        Order::bid(Side::Yes, Decimal::new(48, 2), Decimal::new(200, 0)),
        Order::ask(Side::No, Decimal::new(52, 2), Decimal::new(200, 0)),
    ];

    let result = score_orders(&orders, &reference_market()).unwrap();

    assert!(result.q_one > 0.0);
    assert!((result.q_one - result.q_two).abs() < 1e-9);
    assert_eq!(result.q_min, result.q_one.min(result.q_two));
}

/// One-sided liquidity earns nothing regardless of size.
#[test]
fn test_one_sided_penalty() {
    let orders = vec![Order::bid(
        Side::Yes,
        Decimal::new(48, 2),
        Decimal::new(500, 0),
    )];

    let result = score_orders(&orders, &reference_market()).unwrap();

    assert_eq!(result.q_two, 0.0);
    assert_eq!(result.q_min, 0.0);
}

/// Zero capital is a graceful default, never a panic or an error.
#[test]
fn test_zero_capital_apy() {
    let estimate = estimate_reward(50.0, 200.0, 100.0, 0.0);
    assert_eq!(estimate.annualized_apy, 0.0);
}

/// A static strategy's own suggested orders, fed back through the
/// scorer, reproduce the score the optimizer reported.
#[test]
fn test_static_strategy_round_trip() {
    init_tracing();
    let market = reference_market();
    let optimizer = StaticPlacementOptimizer::new();
    let strategy = optimizer
        .optimize(Decimal::new(2000, 0), &market, 150.0)
        .unwrap();

    let orders = vec![strategy.bid.as_order(), strategy.ask.as_order()];
    let rescored = score_orders(&orders, &market).unwrap();

    assert!((rescored.q_min - strategy.expected_total_score).abs() < 1e-6);
}

/// Exact competition scoring feeds the same reward pipeline the
/// optimizers use.
#[test]
fn test_competition_to_reward_pipeline() {
    let market = reference_market();
    let estimator = CompetitionEstimator::new();

    let competitors = vec![
        Order::bid(Side::Yes, Decimal::new(47, 2), Decimal::new(300, 0)),
        Order::ask(Side::No, Decimal::new(53, 2), Decimal::new(300, 0)),
    ];
    let competition = estimator.exact(&competitors, &market).unwrap();
    assert!(competition > 0.0);

    let optimizer = StaticPlacementOptimizer::new();
    let strategy = optimizer
        .optimize(Decimal::new(2000, 0), &market, competition)
        .unwrap();

    // Competing against someone, the strategy cannot take the whole pool.
    assert!(strategy.expected_daily_reward > 0.0);
    assert!(strategy.expected_daily_reward < 100.0);
}

/// The dynamic search stays inside the caller's spread-ratio bounds and
/// survives missing price history.
#[test]
fn test_dynamic_optimizer_bounds_and_fallback() {
    init_tracing();
    let optimizer = DynamicPlacementOptimizer::new();
    let options = DynamicOptions {
        time_horizon_days: 14.0,
        min_spread_ratio: 0.35,
        max_spread_ratio: 0.85,
    };

    let strategy = optimizer
        .optimize(
            Decimal::new(2000, 0),
            &reference_market(),
            150.0,
            None,
            &options,
        )
        .unwrap();

    let risk = strategy.risk.expect("dynamic strategy carries risk metrics");
    assert!(risk.optimal_spread_ratio >= options.min_spread_ratio);
    assert!(risk.optimal_spread_ratio <= options.max_spread_ratio);
    assert_eq!(risk.volatility_score, DEFAULT_VOLATILITY_SCORE);
    assert!(risk.fill_probability > 0.0 && risk.fill_probability < 1.0);
}

/// Ranked output is sorted by capital efficiency and respects the
/// admission gate on every returned row.
#[test]
fn test_ranker_ordering_and_gate() {
    init_tracing();
    let ranker = MarketOpportunityRanker::new();
    let capital = Decimal::new(5000, 0);

    let snapshots: Vec<MarketSnapshot> = [(10, "a"), (250, "b"), (80, "c"), (500, "d")]
        .iter()
        .map(|(pool, id)| MarketSnapshot {
            config: MarketConfig {
                id: id.to_string(),
                question: format!("Market {}?", id),
                reward_pool: Decimal::new(*pool, 0),
                ..reference_market()
            },
            stats: MarketStats {
                volume_24h: Decimal::new(500_000, 0),
                liquidity: Decimal::new(50_000, 0),
            },
            competitor_orders: None,
        })
        .collect();

    let ranked = ranker
        .rank(capital, &snapshots, &RankOptions::default())
        .unwrap();

    assert!(!ranked.is_empty());
    for pair in ranked.windows(2) {
        assert!(pair[0].capital_efficiency >= pair[1].capital_efficiency);
    }

    let ceiling = capital / Decimal::from_f64_retain(0.8).unwrap();
    for row in &ranked {
        assert!(row.recommended_capital <= ceiling);
    }
}

/// Strategies serialize to JSON and back for the consuming layer.
#[test]
fn test_strategy_serialization_round_trip() {
    let optimizer = StaticPlacementOptimizer::new();
    let strategy = optimizer
        .optimize(Decimal::new(2000, 0), &reference_market(), 150.0)
        .unwrap();

    let json = serde_json::to_string(&strategy).unwrap();
    let parsed: reward_engine::PlacementStrategy = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.id, strategy.id);
    assert_eq!(parsed.bid.price, strategy.bid.price);
    assert_eq!(parsed.ask.size, strategy.ask.size);
    assert_eq!(parsed.expected_total_score, strategy.expected_total_score);
}

/// End-to-end: markets in, batched stats fetch through the provider
/// boundary, ranked opportunities out. A failing market drops out of
/// the ranking instead of failing the batch.
#[tokio::test]
async fn test_rank_for_provider_end_to_end() {
    init_tracing();

    struct StubProvider;

    #[async_trait::async_trait]
    impl MarketDataProvider for StubProvider {
        async fn market_stats(&self, market_id: &str) -> anyhow::Result<MarketStats> {
            if market_id == "market-3" {
                anyhow::bail!("upstream timeout");
            }
            Ok(MarketStats {
                volume_24h: Decimal::new(500_000, 0),
                liquidity: Decimal::new(50_000, 0),
            })
        }

        async fn competitor_orders(&self, _market_id: &str) -> anyhow::Result<Vec<Order>> {
            Ok(Vec::new())
        }
    }

    let markets: Vec<MarketConfig> = (0..7i64)
        .map(|i| MarketConfig {
            id: format!("market-{}", i),
            question: format!("Will market {} resolve YES?", i),
            reward_pool: Decimal::new(50 + i * 40, 0),
            ..reference_market()
        })
        .collect();

    let ranker = MarketOpportunityRanker::new();
    let ranked = ranker
        .rank_for_provider(
            Decimal::new(5000, 0),
            &markets,
            &StubProvider,
            &RankOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(ranked.len(), 6);
    assert!(ranked.iter().all(|r| r.market_id != "market-3"));
    for pair in ranked.windows(2) {
        assert!(pair[0].capital_efficiency >= pair[1].capital_efficiency);
    }
}
