//! # Domain Entities
//!
//! Rental records, swap history and policy configuration.

use super::value_objects::{CrossDomainRoute, DomainId, EscrowPolicy};
use ll_02_channel_ledger::ChannelSettlement;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChannelId, PoolId, RentalId, Timestamp, TokenId};

/// Rental policy constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalConfig {
    /// Collateral as a share of lease cost (12000 = 120%).
    pub collateral_ratio_bps: u64,
    /// Swap fee credited to the renter.
    pub swap_fee_bps: u64,
    /// Platform cut of the owner's settled share.
    pub platform_fee_bps: u64,
    /// What the renter escrows.
    pub escrow_policy: EscrowPolicy,
    /// Shortest lease.
    pub min_duration_secs: u64,
    /// Longest lease.
    pub max_duration_secs: u64,
    /// Highest accepted price per second.
    pub max_price_per_second: Amount,
    /// Gas units charged per swap in profit estimates.
    pub gas_units_per_swap: u64,
    /// Account receiving platform fees.
    pub platform_account: Address,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            collateral_ratio_bps: 12_000,
            swap_fee_bps: 30,
            platform_fee_bps: 200,
            escrow_policy: EscrowPolicy::CollateralOnly,
            min_duration_secs: 60,
            max_duration_secs: 30 * 24 * 3600,
            // 1e24 base units per second.
            max_price_per_second: Amount::exp10(24),
            gas_units_per_swap: 150_000,
            platform_account: [0xFEu8; 20],
        }
    }
}

/// A lease of one pool to one renter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    /// Rental id.
    pub rental_id: RentalId,
    /// Leased pool.
    pub pool_id: PoolId,
    /// Lessee.
    pub renter: Address,
    /// Pool owner at creation.
    pub owner: Address,
    /// Lease start.
    pub start_time: Timestamp,
    /// Lease end (exclusive).
    pub end_time: Timestamp,
    /// Fixed for the whole lease.
    pub price_per_second: Amount,
    /// `duration * price_per_second`.
    pub cost: Amount,
    /// `cost * collateral_ratio`.
    pub collateral: Amount,
    /// Amount locked from the renter under the escrow policy.
    pub escrowed: Amount,
    /// False once settled. Never set back to true.
    pub is_active: bool,
    /// Executed swaps.
    pub swap_count: u64,
    /// Swap fees credited to the renter.
    pub fees_earned: Amount,
    /// Linked channel (renter = A, owner = B).
    pub channel_id: Option<ChannelId>,
    /// Settlement time.
    pub ended_at: Option<Timestamp>,
}

impl Rental {
    /// Lease duration in seconds.
    pub fn duration(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// `now` is at or past `end_time`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.end_time
    }

    /// `who` may settle this rental.
    pub fn is_party(&self, who: &Address) -> bool {
        *who == self.renter || *who == self.owner
    }
}

/// One executed swap. Append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    /// Execution time.
    pub timestamp: Timestamp,
    /// Input token.
    pub token_in: TokenId,
    /// Output token.
    pub token_out: TokenId,
    /// Gross input.
    pub amount_in: Amount,
    /// Output delivered.
    pub amount_out: Amount,
    /// Fee credited to the rental.
    pub fee_charged: Amount,
    /// Gas price supplied with the swap.
    pub gas_price_at_execution: Amount,
    /// Source and destination domains differ.
    pub is_cross_domain: bool,
    /// Source domain, if routed.
    pub source_domain: Option<DomainId>,
    /// Destination domain, if routed.
    pub dest_domain: Option<DomainId>,
}

/// A rental together with its swap history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    /// The rental.
    pub rental: Rental,
    /// Swaps in execution order.
    pub swaps: Vec<SwapRecord>,
}

/// Request to lease a pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRentalRequest {
    /// Pool to lease.
    pub pool_id: PoolId,
    /// Lessee.
    pub renter: Address,
    /// Lease length.
    pub duration_secs: u64,
    /// Fixed price per second.
    pub price_per_second: Amount,
    /// Optional channel between renter (A) and pool owner (B).
    pub channel_id: Option<ChannelId>,
}

/// Request to swap against a leased pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Rental authorizing the swap.
    pub rental_id: RentalId,
    /// Must be the renter.
    pub caller: Address,
    /// Input token.
    pub token_in: TokenId,
    /// Gross input.
    pub amount_in: Amount,
    /// Minimum acceptable output.
    pub min_amount_out: Amount,
    /// Gas price at submission, recorded for profit estimates.
    pub gas_price: Amount,
    /// Cross-domain routing, if any.
    pub route: Option<CrossDomainRoute>,
}

/// Funds moved when a rental ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalSettlement {
    /// Settled rental.
    pub rental_id: RentalId,
    /// Escrow returned to the renter.
    pub renter_refund: Amount,
    /// Paid to the owner (after platform fee).
    pub owner_payout: Amount,
    /// Platform fee.
    pub platform_fee: Amount,
    /// Channel settlement, for channel-backed rentals.
    pub channel: Option<ChannelSettlement>,
    /// Settlement time.
    pub ended_at: Timestamp,
}
