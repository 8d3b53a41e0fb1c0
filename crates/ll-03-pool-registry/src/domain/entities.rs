//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, PoolId, Timestamp, TokenId};

/// Identifier of a registered external router.
pub type RouterId = u32;

/// Where a pool's liquidity lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    /// Raw reserves held by the registry.
    Reserves {
        /// Reserve of `token0`.
        reserve0: Amount,
        /// Reserve of `token1`.
        reserve1: Amount,
    },
    /// Liquidity routed through an external engine.
    Routed {
        /// Registered router handling this pool.
        router: RouterId,
    },
}

/// A liquidity pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Pool id.
    pub pool_id: PoolId,
    /// Pool owner (the lessor).
    pub owner: Address,
    /// First token of the pair.
    pub token0: TokenId,
    /// Second token of the pair.
    pub token1: TokenId,
    /// Liquidity source.
    pub kind: PoolKind,
    /// False once deactivated. Never a valid swap target then.
    pub exists: bool,
    /// Creation time.
    pub created_at: Timestamp,
}

impl Pool {
    /// The other token of the pair, or `None` if `token_in` is not traded here.
    pub fn counter_token(&self, token_in: &TokenId) -> Option<TokenId> {
        if *token_in == self.token0 {
            Some(self.token1)
        } else if *token_in == self.token1 {
            Some(self.token0)
        } else {
            None
        }
    }

    /// `(reserve_in, reserve_out)` for a swap from `token_in`.
    pub fn reserves_for(&self, token_in: &TokenId) -> Option<(Amount, Amount)> {
        match self.kind {
            PoolKind::Reserves { reserve0, reserve1 } if *token_in == self.token0 => {
                Some((reserve0, reserve1))
            }
            PoolKind::Reserves { reserve0, reserve1 } if *token_in == self.token1 => {
                Some((reserve1, reserve0))
            }
            _ => None,
        }
    }

    /// Total reserve value in base units (advisory, for pricing).
    pub fn total_reserve(&self) -> Amount {
        match self.kind {
            PoolKind::Reserves { reserve0, reserve1 } => reserve0.saturating_add(reserve1),
            PoolKind::Routed { .. } => Amount::zero(),
        }
    }
}

/// Parameters for a new reserve pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePoolRequest {
    /// Owner.
    pub owner: Address,
    /// First token.
    pub token0: TokenId,
    /// Second token.
    pub token1: TokenId,
    /// Initial reserve of `token0`.
    pub reserve0: Amount,
    /// Initial reserve of `token1`.
    pub reserve1: Amount,
}

/// Result of a quoted or executed swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Pool swapped against.
    pub pool_id: PoolId,
    /// Input token.
    pub token_in: TokenId,
    /// Output token.
    pub token_out: TokenId,
    /// Gross input.
    pub amount_in: Amount,
    /// Output delivered.
    pub amount_out: Amount,
    /// Fee withheld from the input (not added to reserves).
    pub fee_charged: Amount,
}
