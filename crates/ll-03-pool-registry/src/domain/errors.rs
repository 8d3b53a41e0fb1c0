//! # Domain Errors

use super::entities::RouterId;
use shared_types::{short_hex, Address, Amount, ErrorKind, PoolId, TokenId};
use thiserror::Error;

/// Errors reported by an external swap router.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
    /// Router has no route for this pair.
    #[error("No route for {} -> {}", short_hex(.token_in), short_hex(.token_out))]
    UnsupportedPair {
        /// Input token
        token_in: TokenId,
        /// Output token
        token_out: TokenId,
    },

    /// Route exists but cannot fill the order.
    #[error("Router liquidity exhausted")]
    InsufficientLiquidity,

    /// Router refused the execution.
    #[error("Router rejected execution: {0}")]
    Rejected(String),
}

/// Pool Registry error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// No pool with this id.
    #[error("Pool not found: {0}")]
    PoolNotFound(PoolId),

    /// Pool was deactivated by its owner.
    #[error("Pool {0} is inactive")]
    PoolInactive(PoolId),

    /// Token is not one of the pool's pair.
    #[error("Token {} not traded by pool {pool_id}", short_hex(.token))]
    InvalidToken {
        /// Pool
        pool_id: PoolId,
        /// Offending token
        token: TokenId,
    },

    /// A pool needs two different tokens.
    #[error("Pool tokens must differ")]
    IdenticalTokens,

    /// Swap or liquidity amount is zero.
    #[error("Amount must be positive")]
    ZeroAmount,

    /// Reserves cannot fill the swap.
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    /// Output below the caller's minimum.
    #[error("Slippage exceeded: minimum {min}, got {actual}")]
    SlippageExceeded {
        /// Requested minimum output
        min: Amount,
        /// Output the swap would produce
        actual: Amount,
    },

    /// Fee rate above 100%.
    #[error("Invalid fee: {0} bps")]
    InvalidFee(u64),

    /// Caller does not own the pool.
    #[error("{} does not own pool {pool_id}", short_hex(.caller))]
    NotOwner {
        /// Pool
        pool_id: PoolId,
        /// Caller
        caller: Address,
    },

    /// Operation only applies to reserve pools.
    #[error("Pool {0} is routed externally")]
    NotReservePool(PoolId),

    /// Routed pool references an unknown router.
    #[error("Router {0} not registered")]
    RouterNotFound(RouterId),

    /// External router failure.
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Amount arithmetic overflowed.
    #[error("Arithmetic overflow")]
    Overflow,
}

impl PoolError {
    /// Caller-facing classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoolError::NotOwner { .. } => ErrorKind::Authorization,
            PoolError::PoolNotFound(_)
            | PoolError::PoolInactive(_)
            | PoolError::NotReservePool(_)
            | PoolError::RouterNotFound(_) => ErrorKind::State,
            _ => ErrorKind::Validation,
        }
    }
}
