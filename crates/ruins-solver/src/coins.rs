//! Coin monument solver.
//!
//! The monument in the central hall reads `_ + _ * _^2 + _^3 - _ = 399`
//! and has five circular slots. This module tries every ordering of the
//! coins and stops at the first one that balances the equation.

use std::time::Instant;

use itertools::Itertools;

use crate::error::{Result, SolverError};

/// Number of slots on the monument
pub const SLOTS: usize = 5;

/// Value the monument equation must produce
pub const MONUMENT_TARGET: i64 = 399;

/// Coin values found around the ruins
pub const DEFAULT_COINS: [i64; SLOTS] = [2, 3, 5, 7, 9];

/// Configuration for the coin search
#[derive(Debug, Clone)]
pub struct CoinConfig {
    /// Coin values, in the order permutations are generated from
    pub coins: Vec<i64>,
    /// Required value of the equation
    pub target: i64,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            coins: DEFAULT_COINS.to_vec(),
            target: MONUMENT_TARGET,
        }
    }
}

/// Result of the coin search
#[derive(Debug, Clone)]
pub struct CoinResult {
    /// First ordering that satisfies the equation
    pub order: Option<[i64; SLOTS]>,
    /// Number of orderings evaluated
    pub permutations_tested: usize,
    /// Whether every ordering was evaluated
    pub search_exhausted: bool,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Evaluate `a + b * c^2 + d^3 - e` for one ordering.
///
/// Returns `None` if the arithmetic overflows.
pub fn monument_value(order: &[i64; SLOTS]) -> Option<i64> {
    let [a, b, c, d, e] = *order;
    b.checked_mul(c.checked_pow(2)?)?
        .checked_add(a)?
        .checked_add(d.checked_pow(3)?)?
        .checked_sub(e)
}

/// Name of the coin carrying a given value
pub fn coin_name(value: i64) -> &'static str {
    match value {
        2 => "red coin",
        3 => "corroded coin",
        5 => "shiny coin",
        7 => "concave coin",
        9 => "blue coin",
        _ => "unknown coin",
    }
}

/// Search the orderings of `config.coins` in lexicographic generation order.
///
/// Stops at the first ordering whose equation value equals `config.target`.
/// An empty `order` in the result is a normal outcome.
pub fn find_coin_order(config: &CoinConfig) -> Result<CoinResult> {
    if config.coins.len() != SLOTS {
        return Err(SolverError::CoinCount(config.coins.len()));
    }

    let start_time = Instant::now();
    let mut permutations_tested: usize = 0;

    tracing::debug!(coins = ?config.coins, target = config.target, "searching coin orderings");

    let order = config
        .coins
        .iter()
        .copied()
        .permutations(SLOTS)
        .find_map(|perm| {
            permutations_tested += 1;
            let order: [i64; SLOTS] = perm.try_into().ok()?;
            (monument_value(&order) == Some(config.target)).then_some(order)
        });

    tracing::debug!(permutations_tested, found = order.is_some(), "coin search finished");

    Ok(CoinResult {
        search_exhausted: order.is_none(),
        order,
        permutations_tested,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    })
}
