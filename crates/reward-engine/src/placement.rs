//! Order placement strategies.
//!
//! The static optimizer computes a single balanced two-sided placement
//! at a fixed, conservative fraction of the allowed spread; a closed
//! form, no search. The dynamic optimizer in [`crate::dynamic`] reuses
//! the same leg construction across a grid of candidate spreads.

use chrono::{DateTime, Utc};
use market_core::config::OptimizerConfig;
use market_core::types::{MarketConfig, Order, OrderType, Side};
use market_core::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::reward::{estimate_reward, RewardEstimate};
use crate::scoring::{decimal_to_f64, spread_score};

/// One leg of a recommended order pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSuggestion {
    pub side: Side,
    pub order_type: OrderType,
    pub price: Decimal,
    pub size: Decimal,
    pub capital_required: Decimal,
    /// Contribution this leg makes to the provider's q-score.
    pub expected_score: f64,
    pub reasoning: String,
}

impl PlacementSuggestion {
    /// Express this suggestion as the resting order it describes, for
    /// re-scoring or downstream submission.
    pub fn as_order(&self) -> Order {
        Order::new(self.side, self.order_type, self.price, self.size)
    }
}

/// Risk fields populated by the dynamic optimizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Estimated likelihood the resting pair trades through before it
    /// can be repriced.
    pub fill_probability: f64,
    /// Recent price dispersion, 0-100.
    pub volatility_score: f64,
    /// Expected reward over the caller's time horizon.
    pub expected_value: f64,
    /// Expected value discounted by fill risk.
    pub risk_adjusted_return: f64,
    /// The spread ratio the search settled on.
    pub optimal_spread_ratio: f64,
}

/// A recommended two-sided placement with its projected economics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementStrategy {
    pub id: Uuid,
    pub market_id: String,
    pub bid: PlacementSuggestion,
    pub ask: PlacementSuggestion,
    /// The binding q-min the pair is expected to earn.
    pub expected_total_score: f64,
    pub expected_daily_reward: f64,
    /// Daily reward per unit of capital actually required.
    pub estimated_roi: f64,
    pub tips: Vec<String>,
    /// Present only on dynamically optimized strategies.
    pub risk: Option<RiskMetrics>,
    pub created_at: DateTime<Utc>,
}

impl PlacementStrategy {
    /// Capital actually needed to rest both legs. May exceed the
    /// requested capital when sizes were raised to the market minimum.
    pub fn total_capital(&self) -> Decimal {
        self.bid.capital_required + self.ask.capital_required
    }

    pub fn legs(&self) -> [&PlacementSuggestion; 2] {
        [&self.bid, &self.ask]
    }
}

/// Both legs of a candidate placement before economics are attached.
pub(crate) struct TwoSidedPlacement {
    pub bid: PlacementSuggestion,
    pub ask: PlacementSuggestion,
    pub q_min: f64,
    pub min_size_bumped: bool,
}

impl TwoSidedPlacement {
    pub fn total_capital(&self) -> Decimal {
        self.bid.capital_required + self.ask.capital_required
    }
}

/// Snap a raw price onto the 2dp tick grid without leaving the reward
/// window or the open (0, 1) price domain.
fn snap_price(raw: Decimal, lower: Decimal, upper: Decimal) -> Decimal {
    let floor = lower.max(Decimal::new(1, 2)).min(upper);
    let ceil = upper.min(Decimal::new(99, 2)).max(floor);
    let clamped = raw.clamp(floor, ceil);
    let rounded = clamped.round_dp(2);
    if rounded < lower || rounded > upper {
        clamped
    } else {
        rounded
    }
}

/// Build a balanced buy/sell pair at `spread_ratio` of the allowed
/// spread. Capital splits evenly; a leg whose computed size falls below
/// the market minimum is raised to it, growing the capital requirement.
///
/// Expected inputs are pre-validated by the callers.
pub(crate) fn build_two_sided(
    capital: Decimal,
    market: &MarketConfig,
    spread_ratio: f64,
) -> Result<TwoSidedPlacement> {
    let ratio = Decimal::from_f64_retain(spread_ratio.clamp(0.0, 1.0)).unwrap_or(Decimal::ONE);
    let offset = market.max_spread * ratio;
    let (lower, upper) = market.spread_window();

    let bid_price = snap_price(market.midpoint - offset, lower, upper);
    let ask_price = snap_price(market.midpoint + offset, lower, upper);

    if bid_price <= Decimal::ZERO || ask_price <= Decimal::ZERO {
        return Err(Error::InvalidMarket(format!(
            "reward window of market {} collapses to a non-positive price",
            market.id
        )));
    }

    let per_side = capital / Decimal::TWO;
    let mut min_size_bumped = false;

    let mut leg = |order_type: OrderType, side: Side, price: Decimal| {
        let mut size = (per_side / price).round_dp(2);
        if size < market.min_size {
            size = market.min_size;
            min_size_bumped = true;
        }
        let capital_required = (price * size).round_dp(2);
        let distance = (decimal_to_f64(price) - decimal_to_f64(market.midpoint)).abs();
        let expected_score =
            spread_score(distance, decimal_to_f64(market.max_spread)) * decimal_to_f64(size);
        let placement_pct = spread_ratio * 100.0;
        let reasoning = match order_type {
            OrderType::Bid => format!(
                "Rest a bid at {} ({:.0}% of the allowed spread below the midpoint)",
                price, placement_pct
            ),
            OrderType::Ask => format!(
                "Rest an ask at {} ({:.0}% of the allowed spread above the midpoint)",
                price, placement_pct
            ),
        };
        PlacementSuggestion {
            side,
            order_type,
            price,
            size,
            capital_required,
            expected_score,
            reasoning,
        }
    };

    let bid = leg(OrderType::Bid, Side::Yes, bid_price);
    let ask = leg(OrderType::Ask, Side::No, ask_price);
    let q_min = bid.expected_score.min(ask.expected_score);

    Ok(TwoSidedPlacement {
        bid,
        ask,
        q_min,
        min_size_bumped,
    })
}

/// Attach reward economics and caller guidance to a built pair.
pub(crate) fn assemble_strategy(
    placement: TwoSidedPlacement,
    market: &MarketConfig,
    competition_q_min: f64,
    requested_capital: Decimal,
    risk: Option<RiskMetrics>,
) -> (PlacementStrategy, RewardEstimate) {
    let actual_capital = placement.total_capital();
    let total_q_min = competition_q_min.max(0.0) + placement.q_min;
    let estimate = estimate_reward(
        placement.q_min,
        total_q_min,
        decimal_to_f64(market.reward_pool),
        decimal_to_f64(actual_capital),
    );

    let mut tips = Vec::new();
    if placement.min_size_bumped {
        tips.push(format!(
            "Leg sizes were raised to the market minimum of {}; resting both legs needs {} rather than the requested {}",
            market.min_size, actual_capital, requested_capital
        ));
    }
    tips.push(
        "Only the smaller side of the pair counts; keep both legs resting to earn the reward"
            .to_string(),
    );
    if estimate.user_share > 0.5 {
        tips.push(
            "This placement would dominate current competition; expect the share to shrink as others join"
                .to_string(),
        );
    }

    let capital_f = decimal_to_f64(actual_capital);
    let estimated_roi = if capital_f > 0.0 {
        estimate.daily_reward / capital_f
    } else {
        0.0
    };

    let strategy = PlacementStrategy {
        id: Uuid::new_v4(),
        market_id: market.id.clone(),
        bid: placement.bid,
        ask: placement.ask,
        expected_total_score: placement.q_min,
        expected_daily_reward: estimate.daily_reward,
        estimated_roi,
        tips,
        risk,
        created_at: Utc::now(),
    };

    (strategy, estimate)
}

/// Closed-form "safe" placement: both legs at a fixed conservative
/// fraction of the maximum allowed spread.
#[derive(Debug, Clone, Default)]
pub struct StaticPlacementOptimizer {
    config: OptimizerConfig,
}

impl StaticPlacementOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Compute the balanced two-sided placement for `capital`.
    ///
    /// The reported capital requirement is the *actual* amount needed,
    /// which exceeds `capital` when minimum sizes force larger legs; a
    /// tip flags that case.
    pub fn optimize(
        &self,
        capital: Decimal,
        market: &MarketConfig,
        competition_q_min: f64,
    ) -> Result<PlacementStrategy> {
        market.validate()?;
        if capital < Decimal::ZERO {
            return Err(Error::InvalidArgument {
                message: format!("capital must not be negative, got {}", capital),
            });
        }

        let placement = build_two_sided(capital, market, self.config.safe_spread_ratio)?;

        debug!(
            market_id = %market.id,
            q_min = placement.q_min,
            bumped = placement.min_size_bumped,
            "Static placement built"
        );

        let (strategy, _) =
            assemble_strategy(placement, market, competition_q_min, capital, None);
        Ok(strategy)
    }
}
