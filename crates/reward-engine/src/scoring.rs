//! Liquidity score calculation.
//!
//! Reproduces the exchange's published reward-scoring formula from raw
//! resting orders: each qualifying order earns a quadratic closeness
//! score times its size, summed per book side, and the binding score is
//! the minimum of the two sides. Quoting only one side scores zero by
//! construction.

use market_core::types::{MarketConfig, Order, OrderType};
use market_core::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Convert Decimal to f64 at the analytics boundary.
pub(crate) fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// The three-part liquidity score for one provider in one market.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score accrued on the bid (YES-improving) side.
    pub q_one: f64,
    /// Score accrued on the ask (NO-improving) side.
    pub q_two: f64,
    /// The binding two-sided score: `min(q_one, q_two)`.
    pub q_min: f64,
}

impl ScoreResult {
    pub fn zero() -> Self {
        Self {
            q_one: 0.0,
            q_two: 0.0,
            q_min: 0.0,
        }
    }
}

/// Closeness score for an order resting `distance` probability points
/// from the midpoint: 1 at the midpoint, 0 at the window edge, quadratic
/// in between so near-midpoint liquidity earns disproportionately more.
pub fn spread_score(distance: f64, max_spread: f64) -> f64 {
    if max_spread <= 0.0 {
        return 0.0;
    }
    let ratio = ((max_spread - distance.abs()) / max_spread).clamp(0.0, 1.0);
    ratio * ratio
}

/// Score a set of resting orders against a market's reward parameters.
///
/// Orders below the minimum size or resting outside the reward window
/// contribute exactly zero; they are not errors. The only hard failure
/// is a structurally invalid market configuration.
pub fn score_orders(orders: &[Order], market: &MarketConfig) -> Result<ScoreResult> {
    market.validate()?;

    let midpoint = decimal_to_f64(market.midpoint);
    let max_spread = decimal_to_f64(market.max_spread);
    let (lower, upper) = market.spread_window();

    let mut q_one = 0.0_f64;
    let mut q_two = 0.0_f64;

    for order in orders {
        if order.size < market.min_size {
            continue;
        }
        if order.price < lower || order.price > upper {
            continue;
        }

        let distance = (decimal_to_f64(order.price) - midpoint).abs();
        let contribution = spread_score(distance, max_spread) * decimal_to_f64(order.size);

        match order.order_type {
            OrderType::Bid => q_one += contribution,
            OrderType::Ask => q_two += contribution,
        }
    }

    Ok(ScoreResult {
        q_one,
        q_two,
        q_min: q_one.min(q_two),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::types::Side;

    fn test_market() -> MarketConfig {
        MarketConfig {
            id: "market-1".to_string(),
            question: "Will it resolve YES?".to_string(),
            midpoint: Decimal::new(50, 2),
            max_spread: Decimal::new(5, 2),
            min_size: Decimal::new(100, 0),
            reward_pool: Decimal::new(100, 0),
        }
    }

    #[test]
    fn test_balanced_two_sided_orders() {
        let orders = vec![
            Order::bid(Side::Yes, Decimal::new(48, 2), Decimal::new(200, 0)),
            Order::ask(Side::No, Decimal::new(52, 2), Decimal::new(200, 0)),
        ];

        let result = score_orders(&orders, &test_market()).unwrap();

        // Both legs rest 0.02 from the midpoint: ratio 0.6, score 0.36,
        // contribution 0.36 * 200 = 72 per side.
        assert!((result.q_one - 72.0).abs() < 1e-12);
        assert!((result.q_two - 72.0).abs() < 1e-12);
        assert_eq!(result.q_min, result.q_one.min(result.q_two));
    }

    #[test]
    fn test_one_sided_liquidity_scores_zero() {
        let orders = vec![Order::bid(
            Side::Yes,
            Decimal::new(48, 2),
            Decimal::new(500, 0),
        )];

        let result = score_orders(&orders, &test_market()).unwrap();

        assert!(result.q_one > 0.0);
        assert_eq!(result.q_two, 0.0);
        assert_eq!(result.q_min, 0.0);
    }

    #[test]
    fn test_below_min_size_contributes_zero() {
        let orders = vec![
            Order::bid(Side::Yes, Decimal::new(48, 2), Decimal::new(99, 0)),
            Order::ask(Side::No, Decimal::new(52, 2), Decimal::new(200, 0)),
        ];

        let result = score_orders(&orders, &test_market()).unwrap();
        assert_eq!(result.q_one, 0.0);
        assert!(result.q_two > 0.0);
    }

    #[test]
    fn test_outside_spread_window_contributes_zero() {
        let orders = vec![
            Order::bid(Side::Yes, Decimal::new(44, 2), Decimal::new(200, 0)),
            Order::ask(Side::No, Decimal::new(56, 2), Decimal::new(200, 0)),
        ];

        let result = score_orders(&orders, &test_market()).unwrap();
        assert_eq!(result.q_one, 0.0);
        assert_eq!(result.q_two, 0.0);
        assert_eq!(result.q_min, 0.0);
    }

    #[test]
    fn test_order_at_window_edge_scores_zero() {
        let orders = vec![Order::bid(
            Side::Yes,
            Decimal::new(45, 2),
            Decimal::new(200, 0),
        )];

        // Exactly at midpoint - max_spread: qualifies but scores zero.
        let result = score_orders(&orders, &test_market()).unwrap();
        assert_eq!(result.q_one, 0.0);
    }

    #[test]
    fn test_closer_to_midpoint_scores_higher() {
        let market = test_market();
        let far = score_orders(
            &[Order::bid(
                Side::Yes,
                Decimal::new(46, 2),
                Decimal::new(200, 0),
            )],
            &market,
        )
        .unwrap();
        let near = score_orders(
            &[Order::bid(
                Side::Yes,
                Decimal::new(49, 2),
                Decimal::new(200, 0),
            )],
            &market,
        )
        .unwrap();

        assert!(near.q_one > far.q_one);
    }

    #[test]
    fn test_larger_size_scores_higher() {
        let market = test_market();
        let small = score_orders(
            &[Order::bid(
                Side::Yes,
                Decimal::new(48, 2),
                Decimal::new(200, 0),
            )],
            &market,
        )
        .unwrap();
        let large = score_orders(
            &[Order::bid(
                Side::Yes,
                Decimal::new(48, 2),
                Decimal::new(400, 0),
            )],
            &market,
        )
        .unwrap();

        assert!(large.q_one > small.q_one);
        // Contribution is linear in size.
        assert!((large.q_one - 2.0 * small.q_one).abs() < 1e-12);
    }

    #[test]
    fn test_quadratic_spread_score_shape() {
        assert_eq!(spread_score(0.0, 0.05), 1.0);
        assert_eq!(spread_score(0.05, 0.05), 0.0);
        // Halfway out scores a quarter, not a half.
        assert!((spread_score(0.025, 0.05) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_orders_score_zero() {
        let result = score_orders(&[], &test_market()).unwrap();
        assert_eq!(result.q_min, 0.0);
        assert_eq!(result.q_one, 0.0);
        assert_eq!(result.q_two, 0.0);
    }

    #[test]
    fn test_invalid_market_rejected() {
        let market = MarketConfig {
            max_spread: Decimal::ZERO,
            ..test_market()
        };
        assert!(score_orders(&[], &market).is_err());
    }

    #[test]
    fn test_extreme_midpoint_uses_same_formula() {
        // Window clamps into [0, 1] naturally; no special branch.
        let market = MarketConfig {
            midpoint: Decimal::new(97, 2),
            ..test_market()
        };
        let orders = vec![
            Order::bid(Side::Yes, Decimal::new(95, 2), Decimal::new(200, 0)),
            Order::ask(Side::No, Decimal::new(99, 2), Decimal::new(200, 0)),
        ];

        let result = score_orders(&orders, &market).unwrap();
        assert!(result.q_min > 0.0);
    }

    #[test]
    fn test_deterministic_for_fixed_ordering() {
        let orders = vec![
            Order::bid(Side::Yes, Decimal::new(47, 2), Decimal::new(150, 0)),
            Order::bid(Side::Yes, Decimal::new(49, 2), Decimal::new(250, 0)),
            Order::ask(Side::No, Decimal::new(51, 2), Decimal::new(180, 0)),
            Order::ask(Side::No, Decimal::new(53, 2), Decimal::new(120, 0)),
        ];
        let market = test_market();

        let first = score_orders(&orders, &market).unwrap();
        let second = score_orders(&orders, &market).unwrap();

        assert_eq!(first.q_one.to_bits(), second.q_one.to_bits());
        assert_eq!(first.q_two.to_bits(), second.q_two.to_bits());
        assert_eq!(first.q_min.to_bits(), second.q_min.to_bits());
    }
}
