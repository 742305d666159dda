//! Recent price history used to derive volatility.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observed price at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

/// A short series of recent prices, ordered oldest-first.
///
/// Lookback windows are anchored at the newest point rather than
/// wall-clock time, so a fixed input always yields the same window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Build a history from unordered points; they are sorted by
    /// timestamp on entry.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The sub-series within `days` of the newest point (inclusive).
    pub fn window_from_latest(&self, days: f64) -> &[PricePoint] {
        let Some(latest) = self.points.last() else {
            return &[];
        };
        let lookback_ms = (days * 86_400_000.0).max(0.0) as i64;
        let cutoff = latest.timestamp - Duration::milliseconds(lookback_ms);
        let start = self.points.partition_point(|p| p.timestamp < cutoff);
        &self.points[start..]
    }
}
