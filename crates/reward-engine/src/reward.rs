//! Reward share and return projection.
//!
//! Converts a provider's binding score and an estimate of the total
//! score in the market into a share of the daily reward pool, then
//! projects daily/monthly/annualized returns on deployed capital. All
//! divisions are guarded: "no competition data yet" resolves to zero,
//! never to an error.

use serde::{Deserialize, Serialize};

/// Projected reward for one provider in one market.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RewardEstimate {
    /// Fraction of the daily pool captured (0-1).
    pub user_share: f64,
    pub daily_reward: f64,
    pub monthly_reward: f64,
    /// Annualized return on deployed capital, as a fraction.
    pub annualized_apy: f64,
}

impl RewardEstimate {
    pub fn zero() -> Self {
        Self {
            user_share: 0.0,
            daily_reward: 0.0,
            monthly_reward: 0.0,
            annualized_apy: 0.0,
        }
    }
}

/// Estimate the reward captured by `user_q_min` out of `total_q_min`.
///
/// `total_q_min` is whatever total the caller believes is competing for
/// the pool; the placement optimizers pass competition plus the user's
/// own score so the share stays a true fraction.
pub fn estimate_reward(
    user_q_min: f64,
    total_q_min: f64,
    reward_pool: f64,
    capital_deployed: f64,
) -> RewardEstimate {
    let user = user_q_min.max(0.0);
    let pool = reward_pool.max(0.0);

    let user_share = if total_q_min > 0.0 {
        (user / total_q_min).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let daily_reward = user_share * pool;
    let monthly_reward = daily_reward * 30.0;
    let annualized_apy = if capital_deployed > 0.0 {
        (daily_reward / capital_deployed) * 365.0
    } else {
        0.0
    };

    RewardEstimate {
        user_share,
        daily_reward,
        monthly_reward,
        annualized_apy,
    }
}
