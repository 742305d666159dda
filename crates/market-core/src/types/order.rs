//! Resting order types scored by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which outcome token the order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

/// Whether the order improves the bid or the ask side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Bid,
    Ask,
}

/// A single resting order contributing to a liquidity score.
///
/// Supplied per calculation call and never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Price in probability points (0-1).
    pub price: Decimal,
    /// Size in shares.
    pub size: Decimal,
    pub side: Side,
    pub order_type: OrderType,
}

impl Order {
    pub fn new(side: Side, order_type: OrderType, price: Decimal, size: Decimal) -> Self {
        Self {
            price,
            size,
            side,
            order_type,
        }
    }

    pub fn bid(side: Side, price: Decimal, size: Decimal) -> Self {
        Self::new(side, OrderType::Bid, price, size)
    }

    pub fn ask(side: Side, price: Decimal, size: Decimal) -> Self {
        Self::new(side, OrderType::Ask, price, size)
    }
}
