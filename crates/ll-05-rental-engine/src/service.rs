//! # Rental Engine Service
//!
//! Application service implementing `RentalEngineApi`.
//!
//! Each rental (with its swap history) sits behind its own mutex. A swap
//! holds the rental mutex while the pool registry locks the pool, so the
//! lock order is always rental → pool.
//!
//! Creation runs entirely under the lease index: the pool check, the channel
//! link check, the escrow lock and the insert. The ledger locks a channel
//! under it but never calls back into the engine.

use crate::algorithms::{
    collateral_for, escrow_required, quote_rental, rental_cost, PricingInputs, RentalQuote,
};
use crate::domain::{
    invariant_duration_in_range, invariant_price_in_range, CreateRentalRequest, Rental,
    RentalConfig, RentalError, RentalRecord, RentalSettlement, RentalStatus, SwapRecord,
    SwapRequest,
};
use crate::ports::inbound::RentalEngineApi;
use crate::ports::outbound::RentalDependencies;
use ll_02_channel_ledger::{
    ChannelSettlement, ChannelStatus, EscrowKey, Party, PlatformFee, SignedBalanceUpdate,
};
use ll_03_pool_registry::{Pool, PoolError};
use ll_04_settlement::{compute_profits, split_platform_fee, ProfitBreakdown, ProfitInputs};
use parking_lot::{Mutex, RwLock};
use shared_types::{bps_of, short_hex, Address, Amount, ChannelId, PoolId, RentalId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct LeaseIndex {
    /// Latest rental per pool. Whether it is still live is read from the rental.
    by_pool: HashMap<PoolId, RentalId>,
    /// Rental each channel backs. A channel is never linked twice.
    by_channel: HashMap<ChannelId, RentalId>,
}

/// Rental Engine service.
pub struct RentalEngineService {
    rentals: RwLock<HashMap<RentalId, Arc<Mutex<RentalRecord>>>>,
    leases: Mutex<LeaseIndex>,
    next_id: AtomicU64,
    deps: RentalDependencies,
    config: RentalConfig,
}

impl RentalEngineService {
    /// Create an engine. Rental ids start at 1.
    pub fn new(config: RentalConfig, deps: RentalDependencies) -> Self {
        Self {
            rentals: RwLock::new(HashMap::new()),
            leases: Mutex::new(LeaseIndex::default()),
            next_id: AtomicU64::new(1),
            deps,
            config,
        }
    }

    /// Policy in force.
    pub fn config(&self) -> &RentalConfig {
        &self.config
    }

    /// Advisory quote for leasing `pool_id`, using the pool's current reserves.
    pub fn quote_for_pool(
        &self,
        pool_id: PoolId,
        inputs: PricingInputs,
        duration_secs: u64,
    ) -> Result<RentalQuote, RentalError> {
        let pool = self.live_pool(pool_id)?;
        let inputs = PricingInputs {
            reserve: pool.total_reserve(),
            ..inputs
        };
        quote_rental(&inputs, duration_secs, &self.config)
    }

    /// Copy of every rental record, ordered by id.
    pub fn snapshot(&self) -> Vec<RentalRecord> {
        let entries: Vec<Arc<Mutex<RentalRecord>>> =
            self.rentals.read().values().cloned().collect();
        let mut all: Vec<RentalRecord> = entries.iter().map(|e| e.lock().clone()).collect();
        all.sort_by_key(|r| r.rental.rental_id);
        all
    }

    /// Replace the engine contents with snapshotted records.
    pub fn restore(&self, records: Vec<RentalRecord>) {
        let next = records
            .iter()
            .map(|r| r.rental.rental_id)
            .max()
            .unwrap_or(0)
            + 1;

        let mut leases = self.leases.lock();
        let mut arena = self.rentals.write();
        *leases = LeaseIndex::default();
        arena.clear();
        for record in records {
            let rental = &record.rental;
            if rental.is_active {
                leases.by_pool.insert(rental.pool_id, rental.rental_id);
            }
            if let Some(channel_id) = rental.channel_id {
                leases.by_channel.insert(channel_id, rental.rental_id);
            }
            arena.insert(record.rental.rental_id, Arc::new(Mutex::new(record)));
        }
        self.next_id.store(next, Ordering::SeqCst);
        info!(rentals = arena.len(), "[ll-05] Rentals restored");
    }

    fn entry(&self, rental_id: RentalId) -> Result<Arc<Mutex<RentalRecord>>, RentalError> {
        self.rentals
            .read()
            .get(&rental_id)
            .cloned()
            .ok_or(RentalError::RentalNotFound(rental_id))
    }

    fn live_pool(&self, pool_id: PoolId) -> Result<Pool, RentalError> {
        let pool = self
            .deps
            .pools
            .get_pool(pool_id)
            .ok_or(PoolError::PoolNotFound(pool_id))?;
        if !pool.exists {
            return Err(PoolError::PoolInactive(pool_id).into());
        }
        Ok(pool)
    }

    /// The channel must be active, undisputed and run from renter (A) to owner (B).
    fn check_channel(
        &self,
        channel_id: ChannelId,
        renter: &Address,
        owner: &Address,
    ) -> Result<(), RentalError> {
        let channel = self
            .deps
            .ledger
            .get_channel(&channel_id)
            .ok_or(RentalError::ChannelNotFound(channel_id))?;
        if channel.status != ChannelStatus::Active
            || channel.participant_a != *renter
            || channel.participant_b != *owner
        {
            return Err(RentalError::ChannelMismatch(channel_id));
        }
        Ok(())
    }

    fn platform_fee(&self) -> PlatformFee {
        PlatformFee {
            bps: self.config.platform_fee_bps,
            recipient: self.config.platform_account,
            charged_side: Party::B,
        }
    }

    /// Link a channel to a rental that is about to be inserted.
    ///
    /// Called under the lease index with the rental's escrow already locked.
    /// On failure the escrow goes back to the renter.
    fn bind_channel(
        &self,
        rental_id: RentalId,
        channel_id: ChannelId,
        renter: &Address,
        escrowed: Amount,
    ) -> Result<(), RentalError> {
        if let Err(err) = self.deps.ledger.attach_fee(channel_id, self.platform_fee()) {
            warn!(
                rental_id,
                channel_id = %short_hex(&channel_id),
                error = %err,
                "[ll-05] Channel link rejected"
            );
            if !escrowed.is_zero() {
                self.deps
                    .vault
                    .release(EscrowKey::Rental(rental_id), &[(*renter, escrowed)])
                    .map_err(RentalError::Escrow)?;
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Refund the escrow of a channel-backed rental and close it out.
    fn finish_channel_backed(
        &self,
        record: &mut RentalRecord,
        channel: ChannelSettlement,
    ) -> Result<RentalSettlement, RentalError> {
        let rental = &mut record.rental;
        let refund = rental.escrowed;
        if !refund.is_zero() {
            self.deps
                .vault
                .release(EscrowKey::Rental(rental.rental_id), &[(rental.renter, refund)])
                .map_err(RentalError::Escrow)?;
        }
        let now = self.deps.clock.now();
        rental.is_active = false;
        rental.ended_at = Some(now);

        Ok(RentalSettlement {
            rental_id: rental.rental_id,
            renter_refund: refund,
            owner_payout: channel.payout_b,
            platform_fee: channel.platform_fee,
            channel: Some(channel),
            ended_at: now,
        })
    }

    /// Finish a channel-backed rental whose channel was settled outside the engine.
    fn finish_after_channel(
        &self,
        record: &mut RentalRecord,
        channel_id: ChannelId,
        caller: Address,
    ) -> Result<RentalSettlement, RentalError> {
        let rental_id = record.rental.rental_id;
        ensure_settleable(&record.rental, &caller)?;
        let settled = self
            .deps
            .ledger
            .get_channel(&channel_id)
            .and_then(|channel| channel.final_settlement())
            .ok_or(RentalError::ChannelRequired(rental_id))?;
        let settlement = self.finish_channel_backed(record, settled)?;

        info!(
            rental_id,
            closer = %short_hex(&caller),
            owner_payout = %settlement.owner_payout,
            refund = %settlement.renter_refund,
            "[ll-05] Rental finished from settled channel"
        );
        Ok(settlement)
    }
}

/// Channel-backed settlement needs a linked channel, a party and a live rental.
fn ensure_settleable(rental: &Rental, caller: &Address) -> Result<ChannelId, RentalError> {
    let channel_id = rental
        .channel_id
        .ok_or(RentalError::NoChannel(rental.rental_id))?;
    if !rental.is_party(caller) {
        return Err(RentalError::NotAuthorized(*caller));
    }
    if !rental.is_active {
        return Err(RentalError::RentalInactive(rental.rental_id));
    }
    Ok(channel_id)
}

impl RentalEngineApi for RentalEngineService {
    fn create_rental(&self, request: CreateRentalRequest) -> Result<RentalId, RentalError> {
        invariant_duration_in_range(request.duration_secs, &self.config)?;
        invariant_price_in_range(request.price_per_second, &self.config)?;
        let pool = self.live_pool(request.pool_id)?;

        let cost = rental_cost(request.duration_secs, request.price_per_second)?;
        let collateral = collateral_for(cost, self.config.collateral_ratio_bps)?;
        let escrowed = escrow_required(cost, collateral, self.config.escrow_policy)?;

        let now = self.deps.clock.now();
        let end_time = now
            .checked_add(request.duration_secs)
            .ok_or(RentalError::Overflow)?;

        let mut leases = self.leases.lock();
        if let Some(existing) = leases.by_pool.get(&request.pool_id).copied() {
            let live = self
                .entry(existing)
                .map(|e| e.lock().rental.is_active)
                .unwrap_or(false);
            if live {
                return Err(RentalError::PoolAlreadyRented {
                    pool_id: request.pool_id,
                    rental_id: existing,
                });
            }
        }

        if let Some(channel_id) = request.channel_id {
            if let Some(linked) = leases.by_channel.get(&channel_id).copied() {
                return Err(RentalError::ChannelAlreadyLinked {
                    channel_id,
                    rental_id: linked,
                });
            }
            self.check_channel(channel_id, &request.renter, &pool.owner)?;
        }

        // Creation is serialized by the lease index, so ids are only consumed on success.
        let rental_id = self.next_id.load(Ordering::SeqCst);
        if !escrowed.is_zero() {
            self.deps
                .vault
                .lock(EscrowKey::Rental(rental_id), &request.renter, escrowed)
                .map_err(RentalError::InsufficientEscrow)?;
        }
        if let Some(channel_id) = request.channel_id {
            self.bind_channel(rental_id, channel_id, &request.renter, escrowed)?;
        }

        let rental = Rental {
            rental_id,
            pool_id: request.pool_id,
            renter: request.renter,
            owner: pool.owner,
            start_time: now,
            end_time,
            price_per_second: request.price_per_second,
            cost,
            collateral,
            escrowed,
            is_active: true,
            swap_count: 0,
            fees_earned: Amount::zero(),
            channel_id: request.channel_id,
            ended_at: None,
        };
        self.rentals.write().insert(
            rental_id,
            Arc::new(Mutex::new(RentalRecord {
                rental,
                swaps: Vec::new(),
            })),
        );
        leases.by_pool.insert(request.pool_id, rental_id);
        if let Some(channel_id) = request.channel_id {
            leases.by_channel.insert(channel_id, rental_id);
        }
        self.next_id.store(rental_id + 1, Ordering::SeqCst);

        info!(
            rental_id,
            pool_id = request.pool_id,
            renter = %short_hex(&request.renter),
            %cost,
            %escrowed,
            end_time,
            channel = request.channel_id.is_some(),
            "[ll-05] Rental created"
        );
        Ok(rental_id)
    }

    fn execute_swap(&self, request: SwapRequest) -> Result<Amount, RentalError> {
        let entry = self.entry(request.rental_id)?;
        let mut record = entry.lock();

        let rental = &record.rental;
        if request.caller != rental.renter {
            return Err(RentalError::NotRenter(request.caller));
        }
        if !rental.is_active {
            return Err(RentalError::RentalInactive(rental.rental_id));
        }
        let now = self.deps.clock.now();
        if rental.is_expired(now) {
            return Err(RentalError::RentalExpired {
                rental_id: rental.rental_id,
                end_time: rental.end_time,
                now,
            });
        }

        // The fee is known before the swap, so the accrual is checked up front.
        let expected_fee =
            bps_of(request.amount_in, self.config.swap_fee_bps).ok_or(RentalError::Overflow)?;
        rental
            .fees_earned
            .checked_add(expected_fee)
            .ok_or(RentalError::Overflow)?;

        let outcome = match self.deps.pools.apply_swap(
            rental.pool_id,
            request.token_in,
            request.amount_in,
            self.config.swap_fee_bps,
            request.min_amount_out,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    rental_id = request.rental_id,
                    error = %err,
                    "[ll-05] Swap rejected"
                );
                return Err(err.into());
            }
        };

        let route = request.route;
        let record = &mut *record;
        record.rental.fees_earned = record.rental.fees_earned.saturating_add(outcome.fee_charged);
        record.rental.swap_count += 1;
        record.swaps.push(SwapRecord {
            timestamp: now,
            token_in: outcome.token_in,
            token_out: outcome.token_out,
            amount_in: outcome.amount_in,
            amount_out: outcome.amount_out,
            fee_charged: outcome.fee_charged,
            gas_price_at_execution: request.gas_price,
            is_cross_domain: route.is_some_and(|r| r.is_cross_domain()),
            source_domain: route.map(|r| r.source_domain),
            dest_domain: route.map(|r| r.dest_domain),
        });

        debug!(
            rental_id = request.rental_id,
            swap = record.rental.swap_count,
            amount_in = %outcome.amount_in,
            amount_out = %outcome.amount_out,
            fee = %outcome.fee_charged,
            "[ll-05] Swap executed"
        );
        Ok(outcome.amount_out)
    }

    fn end_rental_with_channel(
        &self,
        rental_id: RentalId,
        caller: Address,
        final_state: SignedBalanceUpdate,
    ) -> Result<RentalSettlement, RentalError> {
        let entry = self.entry(rental_id)?;
        let mut record = entry.lock();
        let channel_id = ensure_settleable(&record.rental, &caller)?;
        if final_state.channel_id != channel_id {
            return Err(RentalError::ChannelMismatch(final_state.channel_id));
        }

        let channel = self
            .deps
            .ledger
            .close_channel_with_fee(final_state, self.platform_fee())?;
        let settlement = self.finish_channel_backed(&mut record, channel)?;

        info!(
            rental_id,
            closer = %short_hex(&caller),
            owner_payout = %settlement.owner_payout,
            platform_fee = %settlement.platform_fee,
            refund = %settlement.renter_refund,
            "[ll-05] Rental ended through channel"
        );
        Ok(settlement)
    }

    fn end_rental(
        &self,
        rental_id: RentalId,
        caller: Address,
    ) -> Result<RentalSettlement, RentalError> {
        let entry = self.entry(rental_id)?;
        let mut record = entry.lock();

        if let Some(channel_id) = record.rental.channel_id {
            return self.finish_after_channel(&mut record, channel_id, caller);
        }
        let rental = &mut record.rental;
        if !rental.is_party(&caller) {
            return Err(RentalError::NotAuthorized(caller));
        }
        if !rental.is_active {
            return Err(RentalError::RentalInactive(rental_id));
        }
        let now = self.deps.clock.now();
        if caller != rental.renter && !rental.is_expired(now) {
            return Err(RentalError::RentalNotExpired {
                rental_id,
                end_time: rental.end_time,
                now,
            });
        }

        let charged = rental.cost.min(rental.escrowed);
        let split = split_platform_fee(charged, self.config.platform_fee_bps)?;
        let renter_refund = rental.escrowed - charged;

        let payouts: Vec<(Address, Amount)> = [
            (rental.owner, split.to_recipient),
            (self.config.platform_account, split.platform_fee),
            (rental.renter, renter_refund),
        ]
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .collect();
        self.deps
            .vault
            .release(EscrowKey::Rental(rental_id), &payouts)
            .map_err(RentalError::Escrow)?;

        rental.is_active = false;
        rental.ended_at = Some(now);

        info!(
            rental_id,
            closer = %short_hex(&caller),
            owner_payout = %split.to_recipient,
            platform_fee = %split.platform_fee,
            refund = %renter_refund,
            "[ll-05] Rental ended"
        );
        Ok(RentalSettlement {
            rental_id,
            renter_refund,
            owner_payout: split.to_recipient,
            platform_fee: split.platform_fee,
            channel: None,
            ended_at: now,
        })
    }

    fn resolve_rental_dispute(
        &self,
        rental_id: RentalId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
    ) -> Result<RentalSettlement, RentalError> {
        let entry = self.entry(rental_id)?;
        let mut record = entry.lock();
        let channel_id = ensure_settleable(&record.rental, &caller)?;

        let channel = self.deps.ledger.resolve_dispute_with_fee(
            channel_id,
            caller,
            final_balance_a,
            final_balance_b,
            self.platform_fee(),
        )?;
        let settlement = self.finish_channel_backed(&mut record, channel)?;

        info!(
            rental_id,
            resolver = %short_hex(&caller),
            owner_payout = %settlement.owner_payout,
            "[ll-05] Rental ended through dispute"
        );
        Ok(settlement)
    }

    fn get_rental(&self, rental_id: RentalId) -> Option<Rental> {
        let entry = self.rentals.read().get(&rental_id).cloned()?;
        let rental = entry.lock().rental.clone();
        Some(rental)
    }

    fn get_swap_history(&self, rental_id: RentalId) -> Result<Vec<SwapRecord>, RentalError> {
        let entry = self.entry(rental_id)?;
        let swaps = entry.lock().swaps.clone();
        Ok(swaps)
    }

    fn get_renter_rentals(&self, renter: &Address) -> Vec<Rental> {
        self.snapshot()
            .into_iter()
            .map(|record| record.rental)
            .filter(|rental| rental.renter == *renter)
            .collect()
    }

    fn get_owner_pools(&self, owner: &Address) -> Vec<Pool> {
        self.deps.pools.get_owner_pools(owner)
    }

    fn get_rental_profits(&self, rental_id: RentalId) -> Result<ProfitBreakdown, RentalError> {
        let entry = self.entry(rental_id)?;
        let inputs = {
            let record = entry.lock();
            ProfitInputs {
                total_fees_earned: record.rental.fees_earned,
                rental_cost_paid: record.rental.cost,
                gas_prices: record
                    .swaps
                    .iter()
                    .map(|s| s.gas_price_at_execution)
                    .collect(),
                gas_units_per_swap: self.config.gas_units_per_swap,
            }
        };
        Ok(compute_profits(&inputs)?)
    }

    fn rental_status(&self, rental_id: RentalId) -> Result<RentalStatus, RentalError> {
        let entry = self.entry(rental_id)?;
        let record = entry.lock();
        let status = if !record.rental.is_active {
            RentalStatus::Ended
        } else if record.rental.is_expired(self.deps.clock.now()) {
            RentalStatus::Expired
        } else {
            RentalStatus::Active
        };
        Ok(status)
    }
}
