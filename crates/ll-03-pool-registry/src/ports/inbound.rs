//! # Inbound Ports
//!
//! API trait defining what the Pool Registry can do.

use crate::domain::{CreatePoolRequest, Pool, PoolError, RouterId, SwapOutcome};
use shared_types::{Address, Amount, PoolId, TokenId};

/// Pool Registry API - inbound port.
pub trait PoolRegistryApi: Send + Sync {
    /// Create a reserve pool.
    fn create_pool(&self, request: CreatePoolRequest) -> Result<PoolId, PoolError>;

    /// Create a pool whose liquidity is routed through a registered router.
    fn create_routed_pool(
        &self,
        owner: Address,
        token0: TokenId,
        token1: TokenId,
        router: RouterId,
    ) -> Result<PoolId, PoolError>;

    /// Owner tops up reserves.
    fn add_liquidity(
        &self,
        pool_id: PoolId,
        caller: Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<(), PoolError>;

    /// Owner retires the pool (`exists = false`).
    fn deactivate_pool(&self, pool_id: PoolId, caller: Address) -> Result<(), PoolError>;

    /// Copy of a pool.
    fn get_pool(&self, pool_id: PoolId) -> Option<Pool>;

    /// Pools owned by `owner`, by id.
    fn get_owner_pools(&self, owner: &Address) -> Vec<Pool>;

    /// Price a swap without executing it.
    fn quote(
        &self,
        pool_id: PoolId,
        token_in: TokenId,
        amount_in: Amount,
        fee_bps: u64,
    ) -> Result<SwapOutcome, PoolError>;

    /// Execute a swap atomically with respect to other swaps on the pool.
    fn apply_swap(
        &self,
        pool_id: PoolId,
        token_in: TokenId,
        amount_in: Amount,
        fee_bps: u64,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError>;
}
