//! # Pool Registry Service
//!
//! Application service implementing `PoolRegistryApi`.
//!
//! Each pool sits behind its own mutex: a swap reads reserves, computes the
//! output and writes reserves in one critical section, while swaps on other
//! pools proceed in parallel.

use crate::algorithms::{apply_swap_to_reserves, get_amount_out, swap_fee};
use crate::domain::{
    CreatePoolRequest, Pool, PoolError, PoolKind, RouterId, SwapOutcome,
};
use crate::ports::inbound::PoolRegistryApi;
use crate::ports::outbound::SwapRouter;
use parking_lot::{Mutex, RwLock};
use shared_types::{short_hex, Address, Amount, PoolId, TimeSource, TokenId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pool Registry service.
pub struct PoolRegistryService {
    pools: RwLock<HashMap<PoolId, Arc<Mutex<Pool>>>>,
    next_id: AtomicU64,
    routers: RwLock<HashMap<RouterId, Arc<dyn SwapRouter>>>,
    clock: Arc<dyn TimeSource>,
}

impl PoolRegistryService {
    /// Create an empty registry. Pool ids start at 1.
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            routers: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Register an external router under `id`.
    pub fn register_router(&self, id: RouterId, router: Arc<dyn SwapRouter>) {
        self.routers.write().insert(id, router);
        info!(router = id, "[ll-03] Router registered");
    }

    /// Copy of every pool, ordered by id.
    pub fn snapshot(&self) -> Vec<Pool> {
        let entries: Vec<Arc<Mutex<Pool>>> = self.pools.read().values().cloned().collect();
        let mut all: Vec<Pool> = entries.iter().map(|entry| entry.lock().clone()).collect();
        all.sort_by_key(|p| p.pool_id);
        all
    }

    /// Replace the registry contents. Routers must be registered again.
    pub fn restore(&self, pools: Vec<Pool>) {
        let next = pools.iter().map(|p| p.pool_id).max().unwrap_or(0) + 1;
        let mut arena = self.pools.write();
        arena.clear();
        for pool in pools {
            arena.insert(pool.pool_id, Arc::new(Mutex::new(pool)));
        }
        self.next_id.store(next, Ordering::SeqCst);
        info!(pools = arena.len(), "[ll-03] Registry restored");
    }

    fn entry(&self, pool_id: PoolId) -> Result<Arc<Mutex<Pool>>, PoolError> {
        self.pools
            .read()
            .get(&pool_id)
            .cloned()
            .ok_or(PoolError::PoolNotFound(pool_id))
    }

    fn router(&self, id: RouterId) -> Result<Arc<dyn SwapRouter>, PoolError> {
        self.routers
            .read()
            .get(&id)
            .cloned()
            .ok_or(PoolError::RouterNotFound(id))
    }

    fn insert(&self, mut pool: Pool) -> PoolId {
        let pool_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        pool.pool_id = pool_id;
        self.pools
            .write()
            .insert(pool_id, Arc::new(Mutex::new(pool)));
        pool_id
    }

    fn owned_mut<R>(
        &self,
        pool_id: PoolId,
        caller: Address,
        f: impl FnOnce(&mut Pool) -> Result<R, PoolError>,
    ) -> Result<R, PoolError> {
        let entry = self.entry(pool_id)?;
        let mut pool = entry.lock();
        if pool.owner != caller {
            return Err(PoolError::NotOwner { pool_id, caller });
        }
        f(&mut pool)
    }

    /// Price a swap on a locked pool. Returns the outcome and, for reserve
    /// pools, the reserves the pool would hold afterwards.
    fn price(
        &self,
        pool: &Pool,
        token_in: TokenId,
        amount_in: Amount,
        fee_bps: u64,
        execute_with_min: Option<Amount>,
    ) -> Result<(SwapOutcome, Option<PoolKind>), PoolError> {
        if !pool.exists {
            return Err(PoolError::PoolInactive(pool.pool_id));
        }
        let token_out = pool
            .counter_token(&token_in)
            .ok_or(PoolError::InvalidToken {
                pool_id: pool.pool_id,
                token: token_in,
            })?;
        if amount_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let fee_charged = swap_fee(amount_in, fee_bps)?;

        let (amount_out, next_kind) = match pool.kind {
            PoolKind::Reserves { .. } => {
                let (reserve_in, reserve_out) = pool
                    .reserves_for(&token_in)
                    .ok_or(PoolError::InsufficientLiquidity)?;
                let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, fee_bps)?;
                let (new_in, new_out) = apply_swap_to_reserves(
                    reserve_in,
                    reserve_out,
                    amount_in,
                    fee_charged,
                    amount_out,
                )?;
                let next = if token_in == pool.token0 {
                    PoolKind::Reserves {
                        reserve0: new_in,
                        reserve1: new_out,
                    }
                } else {
                    PoolKind::Reserves {
                        reserve0: new_out,
                        reserve1: new_in,
                    }
                };
                (amount_out, Some(next))
            }
            PoolKind::Routed { router } => {
                let router = self.router(router)?;
                let routed_in = amount_in - fee_charged;
                let amount_out = match execute_with_min {
                    Some(min) => router.execute(token_in, token_out, routed_in, min)?,
                    None => router.quote(token_in, token_out, routed_in)?,
                };
                (amount_out, None)
            }
        };

        Ok((
            SwapOutcome {
                pool_id: pool.pool_id,
                token_in,
                token_out,
                amount_in,
                amount_out,
                fee_charged,
            },
            next_kind,
        ))
    }
}

impl PoolRegistryApi for PoolRegistryService {
    fn create_pool(&self, request: CreatePoolRequest) -> Result<PoolId, PoolError> {
        if request.token0 == request.token1 {
            return Err(PoolError::IdenticalTokens);
        }
        let pool_id = self.insert(Pool {
            pool_id: 0,
            owner: request.owner,
            token0: request.token0,
            token1: request.token1,
            kind: PoolKind::Reserves {
                reserve0: request.reserve0,
                reserve1: request.reserve1,
            },
            exists: true,
            created_at: self.clock.now(),
        });

        info!(
            pool_id,
            owner = %short_hex(&request.owner),
            reserve0 = %request.reserve0,
            reserve1 = %request.reserve1,
            "[ll-03] Pool created"
        );
        Ok(pool_id)
    }

    fn create_routed_pool(
        &self,
        owner: Address,
        token0: TokenId,
        token1: TokenId,
        router: RouterId,
    ) -> Result<PoolId, PoolError> {
        if token0 == token1 {
            return Err(PoolError::IdenticalTokens);
        }
        self.router(router)?;
        let pool_id = self.insert(Pool {
            pool_id: 0,
            owner,
            token0,
            token1,
            kind: PoolKind::Routed { router },
            exists: true,
            created_at: self.clock.now(),
        });

        info!(pool_id, router, owner = %short_hex(&owner), "[ll-03] Routed pool created");
        Ok(pool_id)
    }

    fn add_liquidity(
        &self,
        pool_id: PoolId,
        caller: Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<(), PoolError> {
        if amount0.is_zero() && amount1.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        self.owned_mut(pool_id, caller, |pool| {
            if !pool.exists {
                return Err(PoolError::PoolInactive(pool_id));
            }
            match pool.kind {
                PoolKind::Reserves { reserve0, reserve1 } => {
                    pool.kind = PoolKind::Reserves {
                        reserve0: reserve0.checked_add(amount0).ok_or(PoolError::Overflow)?,
                        reserve1: reserve1.checked_add(amount1).ok_or(PoolError::Overflow)?,
                    };
                    debug!(pool_id, %amount0, %amount1, "[ll-03] Liquidity added");
                    Ok(())
                }
                PoolKind::Routed { .. } => Err(PoolError::NotReservePool(pool_id)),
            }
        })
    }

    fn deactivate_pool(&self, pool_id: PoolId, caller: Address) -> Result<(), PoolError> {
        self.owned_mut(pool_id, caller, |pool| {
            pool.exists = false;
            Ok(())
        })?;
        info!(pool_id, "[ll-03] Pool deactivated");
        Ok(())
    }

    fn get_pool(&self, pool_id: PoolId) -> Option<Pool> {
        let entry = self.pools.read().get(&pool_id).cloned()?;
        let pool = entry.lock().clone();
        Some(pool)
    }

    fn get_owner_pools(&self, owner: &Address) -> Vec<Pool> {
        self.snapshot()
            .into_iter()
            .filter(|p| p.owner == *owner)
            .collect()
    }

    fn quote(
        &self,
        pool_id: PoolId,
        token_in: TokenId,
        amount_in: Amount,
        fee_bps: u64,
    ) -> Result<SwapOutcome, PoolError> {
        let entry = self.entry(pool_id)?;
        let pool = entry.lock();
        self.price(&pool, token_in, amount_in, fee_bps, None)
            .map(|(outcome, _)| outcome)
    }

    fn apply_swap(
        &self,
        pool_id: PoolId,
        token_in: TokenId,
        amount_in: Amount,
        fee_bps: u64,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, PoolError> {
        let entry = self.entry(pool_id)?;
        let mut pool = entry.lock();

        // Reserve pools are checked before anything is written.
        let (outcome, next_kind) =
            self.price(&pool, token_in, amount_in, fee_bps, Some(min_amount_out))?;
        if outcome.amount_out < min_amount_out {
            warn!(
                pool_id,
                min = %min_amount_out,
                actual = %outcome.amount_out,
                "[ll-03] Slippage exceeded"
            );
            return Err(PoolError::SlippageExceeded {
                min: min_amount_out,
                actual: outcome.amount_out,
            });
        }
        if let Some(kind) = next_kind {
            pool.kind = kind;
        }

        debug!(
            pool_id,
            amount_in = %outcome.amount_in,
            amount_out = %outcome.amount_out,
            fee = %outcome.fee_charged,
            "[ll-03] Swap applied"
        );
        Ok(outcome)
    }
}
