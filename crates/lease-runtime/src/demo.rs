//! Scripted end-to-end lease, run by the binary against a fresh container.
//!
//! Owner lists a pool, renter opens a channel to the owner, leases the pool,
//! trades through it, pays the lease cost with a signed channel update and
//! ends the rental with a cooperative close.

use crate::container::LeaseContainer;
use anyhow::{Context, Result};
use ll_01_signature_verification::{Intent, IntentSigner};
use ll_02_channel_ledger::{ChannelLedgerApi, OpenChannelRequest, SignedBalanceUpdate};
use ll_03_pool_registry::{CreatePoolRequest, PoolRegistryApi};
use ll_04_settlement::ProfitBreakdown;
use ll_05_rental_engine::{
    CreateRentalRequest, RentalEngineApi, RentalSettlement, SwapRequest,
};
use shared_types::{short_hex, Amount, ChannelId, RentalId, TokenId};
use tracing::info;

const TOKEN_X: TokenId = [0x0Au8; 20];
const TOKEN_Y: TokenId = [0x0Bu8; 20];
const DEMO_SWAPS: u64 = 5;
const LEASE_SECS: u64 = 3_600;

/// Outcome of a demo run.
#[derive(Clone, Debug)]
pub struct DemoReport {
    /// Rental created by the run.
    pub rental_id: RentalId,
    /// Channel that carried the lease payment.
    pub channel_id: ChannelId,
    /// Swaps executed.
    pub swaps: u64,
    /// Fees accrued to the renter.
    pub fees_earned: Amount,
    /// Final settlement.
    pub settlement: RentalSettlement,
    /// Profit breakdown at settlement.
    pub profits: ProfitBreakdown,
}

fn sign_state(
    renter: &IntentSigner,
    owner: &IntentSigner,
    intent: Intent,
    channel_id: ChannelId,
    balance_a: Amount,
    balance_b: Amount,
    nonce: u64,
) -> Result<SignedBalanceUpdate> {
    Ok(SignedBalanceUpdate {
        channel_id,
        balance_a,
        balance_b,
        nonce,
        sig_a: renter.sign_intent(intent, &channel_id, balance_a, balance_b, nonce)?,
        sig_b: owner.sign_intent(intent, &channel_id, balance_a, balance_b, nonce)?,
    })
}

/// Run one complete lease with freshly generated keys.
pub fn run_demo(container: &LeaseContainer) -> Result<DemoReport> {
    let renter = IntentSigner::generate();
    let owner = IntentSigner::generate();
    let token = Amount::exp10(18);

    container
        .vault
        .credit(&renter.address(), token * 1_000u64)
        .context("Failed to fund renter")?;

    let pool_id = container
        .pools
        .create_pool(CreatePoolRequest {
            owner: owner.address(),
            token0: TOKEN_X,
            token1: TOKEN_Y,
            reserve0: token * 1_000u64,
            reserve1: token * 1_000u64,
        })
        .context("Failed to create pool")?;

    let deposit = token * 100u64;
    let mut reference = [0u8; 32];
    reference[24..].copy_from_slice(&pool_id.to_be_bytes());
    let channel_id = container
        .ledger
        .open_channel(OpenChannelRequest {
            participant_a: renter.address(),
            participant_b: owner.address(),
            deposit,
            duration_secs: LEASE_SECS,
            reference,
        })
        .context("Failed to open channel")?;

    let rental_id = container
        .rentals
        .create_rental(CreateRentalRequest {
            pool_id,
            renter: renter.address(),
            duration_secs: LEASE_SECS,
            price_per_second: Amount::exp10(12),
            channel_id: Some(channel_id),
        })
        .context("Failed to create rental")?;
    let rental = container
        .rentals
        .get_rental(rental_id)
        .context("Rental vanished after creation")?;

    info!(
        rental_id,
        pool_id,
        renter = %short_hex(&renter.address()),
        owner = %short_hex(&owner.address()),
        cost = %rental.cost,
        "Demo lease started"
    );

    for i in 0..DEMO_SWAPS {
        let token_in = if i % 2 == 0 { TOKEN_X } else { TOKEN_Y };
        container
            .rentals
            .execute_swap(SwapRequest {
                rental_id,
                caller: renter.address(),
                token_in,
                amount_in: token,
                min_amount_out: Amount::zero(),
                gas_price: Amount::from(20_000_000_000u64),
                route: None,
            })
            .with_context(|| format!("Swap {i} failed"))?;
    }

    // Renter pays the lease cost to the owner off-ledger, then both close on it.
    let balance_a = deposit - rental.cost;
    let balance_b = rental.cost;
    let update = sign_state(&renter, &owner, Intent::Update, channel_id, balance_a, balance_b, 1)?;
    container
        .ledger
        .update_channel(update)
        .context("Channel update rejected")?;

    let close = sign_state(&renter, &owner, Intent::Close, channel_id, balance_a, balance_b, 2)?;
    let profits = container
        .rentals
        .get_rental_profits(rental_id)
        .context("Failed to compute profits")?;
    let settlement = container
        .rentals
        .end_rental_with_channel(rental_id, renter.address(), close)
        .context("Failed to end rental")?;
    let fees_earned = container
        .rentals
        .get_rental(rental_id)
        .map(|r| r.fees_earned)
        .unwrap_or_default();

    Ok(DemoReport {
        rental_id,
        channel_id,
        swaps: DEMO_SWAPS,
        fees_earned,
        settlement,
        profits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeaseConfig;
    use crate::persistence::SnapshotStore;
    use ll_02_channel_ledger::EscrowVault;
    use shared_types::ManualClock;
    use std::sync::Arc;

    fn container() -> LeaseContainer {
        LeaseContainer::with_clock(
            LeaseConfig::default(),
            Arc::new(ManualClock::new(1_700_000_000)),
        )
    }

    #[test]
    fn test_demo_settles_through_channel() {
        let container = container();
        let report = run_demo(&container).unwrap();

        let cost = Amount::exp10(12) * LEASE_SECS;
        let fee = cost * 200u64 / 10_000u64;
        assert_eq!(report.settlement.platform_fee, fee);
        assert_eq!(report.settlement.owner_payout, cost - fee);
        assert_eq!(report.settlement.renter_refund, cost * 12_000u64 / 10_000u64);
        assert_eq!(report.swaps, 5);
        assert_eq!(report.profits.total_fees_earned, report.fees_earned);
        assert!(container.vault.total_locked().is_zero());
        assert!(!container.rentals.get_rental(report.rental_id).unwrap().is_active);
    }

    #[test]
    fn test_snapshot_reloads_into_fresh_container() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snap.json"));

        let first = container();
        run_demo(&first).unwrap();
        let snapshot = first.snapshot();
        store.save(&snapshot).unwrap();

        let second = container();
        second.restore(store.load().unwrap().unwrap()).unwrap();
        assert_eq!(second.snapshot(), snapshot);

        // Ids continue after the restored ones.
        let report = run_demo(&second).unwrap();
        assert_eq!(report.rental_id, 2);
    }
}
