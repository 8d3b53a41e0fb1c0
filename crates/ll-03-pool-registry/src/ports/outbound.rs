//! # Outbound Ports
//!
//! External swap-quoting/routing engine.

use crate::domain::RouterError;
use shared_types::{Amount, TokenId};

/// External liquidity router - outbound port.
///
/// Receives the input amount after the lease fee has been withheld.
pub trait SwapRouter: Send + Sync {
    /// Estimated output.
    fn quote(
        &self,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: Amount,
    ) -> Result<Amount, RouterError>;

    /// Execute and return the actual output.
    fn execute(
        &self,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Amount, RouterError>;
}
