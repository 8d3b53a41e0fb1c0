//! Static Rate Router Adapter
//!
//! Fixed-rate `SwapRouter` for tests and local runs.

use crate::domain::RouterError;
use crate::ports::outbound::SwapRouter;
use parking_lot::RwLock;
use shared_types::{Amount, TokenId};
use std::collections::HashMap;
use tracing::debug;

/// Router quoting every pair at a fixed `numerator / denominator` rate.
#[derive(Default)]
pub struct StaticRateRouter {
    rates: RwLock<HashMap<(TokenId, TokenId), (Amount, Amount)>>,
}

impl StaticRateRouter {
    /// Create a router with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate for `token_in -> token_out`.
    pub fn set_rate(
        &self,
        token_in: TokenId,
        token_out: TokenId,
        numerator: Amount,
        denominator: Amount,
    ) {
        self.rates
            .write()
            .insert((token_in, token_out), (numerator, denominator));
    }
}

impl SwapRouter for StaticRateRouter {
    fn quote(
        &self,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: Amount,
    ) -> Result<Amount, RouterError> {
        let (numerator, denominator) = self
            .rates
            .read()
            .get(&(token_in, token_out))
            .copied()
            .ok_or(RouterError::UnsupportedPair {
                token_in,
                token_out,
            })?;
        if denominator.is_zero() {
            return Err(RouterError::InsufficientLiquidity);
        }
        let scaled = amount_in
            .checked_mul(numerator)
            .ok_or_else(|| RouterError::Rejected("amount overflow".into()))?;
        Ok(scaled / denominator)
    }

    fn execute(
        &self,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Amount, RouterError> {
        let amount_out = self.quote(token_in, token_out, amount_in)?;
        if amount_out < min_amount_out {
            return Err(RouterError::Rejected(format!(
                "output {amount_out} below minimum {min_amount_out}"
            )));
        }
        debug!(%amount_in, %amount_out, "[ll-03] Routed swap executed");
        Ok(amount_out)
    }
}
