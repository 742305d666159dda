//! Price-history dispersion and the fill-probability model.
//!
//! Both curves are empirically calibrated. Their shape is the contract:
//! the volatility score grows with dispersion and is capped at 100; fill
//! probability falls as placement moves away from the midpoint and rises
//! with volatility.

use market_core::types::PriceHistory;

use crate::scoring::decimal_to_f64;

/// Mid-range fallback when no usable price history is supplied:
/// neither "assume calm" nor "assume chaotic".
pub const DEFAULT_VOLATILITY_SCORE: f64 = 50.0;

/// Maps relative dispersion onto the 0-100 scale.
const VOLATILITY_SCALE: f64 = 1000.0;

/// Volatility score (0-100) from the dispersion of recent price moves.
///
/// The lookback window is anchored at the newest point of the series.
/// Returns `None` when fewer than two points fall inside the window;
/// callers fall back to [`DEFAULT_VOLATILITY_SCORE`].
pub fn volatility_score(history: &PriceHistory, lookback_days: f64) -> Option<f64> {
    let window = history.window_from_latest(lookback_days);
    if window.len() < 2 {
        return None;
    }

    let prices: Vec<f64> = window.iter().map(|p| decimal_to_f64(p.price)).collect();
    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    let mean_change = changes.iter().sum::<f64>() / changes.len() as f64;
    let variance = changes
        .iter()
        .map(|c| (c - mean_change).powi(2))
        .sum::<f64>()
        / changes.len() as f64;
    let std_dev = variance.sqrt();

    let mean_price = prices.iter().sum::<f64>() / prices.len() as f64;
    if mean_price <= 0.0 {
        return Some(0.0);
    }

    Some((std_dev / mean_price * VOLATILITY_SCALE).clamp(0.0, 100.0))
}

/// Likelihood a pair resting at `spread_ratio` of the allowed spread
/// trades through before it can be repriced.
///
/// Tighter placement near the midpoint is more likely to be filled;
/// volatile markets reach deeper into the book. Clamped away from 0 and
/// 1, since no resting order is ever a certainty either way.
pub fn fill_probability(spread_ratio: f64, volatility_score: f64) -> f64 {
    let ratio = spread_ratio.clamp(0.0, 1.0);
    let vol = (volatility_score / 100.0).clamp(0.0, 1.0);

    let base = 1.0 - ratio;
    (base * (0.4 + 0.6 * vol)).clamp(0.02, 0.98)
}
