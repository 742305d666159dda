//! Configuration management for the reward optimization engine.
//!
//! Every knob has a default; environment variables override. A variable
//! that is set but unparseable is a hard configuration error rather than
//! a silent fallback.

use crate::{Error, Result};
use std::env;
use std::str::FromStr;

/// Engine-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub ranker: RankerConfig,
    pub competition: CompetitionConfig,
    pub optimizer: OptimizerConfig,
}

/// Settings for multi-market ranking and the data-fetch boundary.
#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Number of market-data fetches issued concurrently per batch.
    pub fetch_concurrency: usize,
    /// Delay between fetch batches, to respect upstream rate limits.
    pub batch_delay_ms: u64,
    /// Soft admission gate: markets requiring more than
    /// `capital / viability_ratio` recommended capital are filtered out.
    pub viability_ratio: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: 5,
            batch_delay_ms: 200,
            viability_ratio: 0.8,
        }
    }
}

/// Calibration constants for the heuristic competition estimator.
///
/// These are empirically tuned, not published by the exchange. Callers
/// that need different calibration swap this struct, not the estimator.
#[derive(Debug, Clone)]
pub struct CompetitionConfig {
    pub liquidity_divisor: f64,
    pub liquidity_cap: f64,
    pub volume_divisor: f64,
    pub volume_cap: f64,
    pub pool_divisor: f64,
    pub pool_cap: f64,
    /// Assumed average q-score achieved per competing provider.
    pub avg_provider_score: f64,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            liquidity_divisor: 100_000.0,
            liquidity_cap: 10.0,
            volume_divisor: 1_000_000.0,
            volume_cap: 5.0,
            pool_divisor: 100.0,
            pool_cap: 5.0,
            avg_provider_score: 35.0,
        }
    }
}

/// Settings for the placement optimizers.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Number of spread-ratio candidates evaluated by the dynamic search.
    pub candidate_count: usize,
    /// Fixed spread ratio used by the static (no-search) optimizer.
    pub safe_spread_ratio: f64,
    /// Objective tolerance within which ties resolve to the wider spread.
    pub tie_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            candidate_count: 20,
            safe_spread_ratio: 0.8,
            tie_tolerance: 1e-9,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            ranker: RankerConfig {
                fetch_concurrency: parse_env("LP_FETCH_CONCURRENCY", 5)?,
                batch_delay_ms: parse_env("LP_BATCH_DELAY_MS", 200)?,
                viability_ratio: parse_env("LP_VIABILITY_RATIO", 0.8)?,
            },
            competition: CompetitionConfig {
                liquidity_divisor: parse_env("LP_LIQUIDITY_DIVISOR", 100_000.0)?,
                liquidity_cap: parse_env("LP_LIQUIDITY_CAP", 10.0)?,
                volume_divisor: parse_env("LP_VOLUME_DIVISOR", 1_000_000.0)?,
                volume_cap: parse_env("LP_VOLUME_CAP", 5.0)?,
                pool_divisor: parse_env("LP_POOL_DIVISOR", 100.0)?,
                pool_cap: parse_env("LP_POOL_CAP", 5.0)?,
                avg_provider_score: parse_env("LP_AVG_PROVIDER_SCORE", 35.0)?,
            },
            optimizer: OptimizerConfig {
                candidate_count: parse_env("LP_CANDIDATE_COUNT", 20)?,
                safe_spread_ratio: parse_env("LP_SAFE_SPREAD_RATIO", 0.8)?,
                tie_tolerance: parse_env("LP_TIE_TOLERANCE", 1e-9)?,
            },
        })
    }
}

/// Parse an environment variable, using the default when unset and
/// erroring when set but unparseable.
fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| Error::Config {
            message: format!("{} is not a valid value for {}", raw, key),
        }),
        Err(_) => Ok(default),
    }
}
