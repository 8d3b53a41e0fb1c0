//! # Inbound Ports
//!
//! API trait defining what the Rental Engine can do.

use crate::domain::{
    CreateRentalRequest, Rental, RentalError, RentalSettlement, RentalStatus, SwapRecord,
    SwapRequest,
};
use ll_02_channel_ledger::SignedBalanceUpdate;
use ll_03_pool_registry::Pool;
use ll_04_settlement::ProfitBreakdown;
use shared_types::{Address, Amount, RentalId};

/// Rental Engine API - inbound port.
pub trait RentalEngineApi: Send + Sync {
    /// Escrow from the renter and start a lease.
    ///
    /// A linked channel backs this rental only, and the platform fee terms
    /// are bound to it so that any close of the channel pays the fee.
    fn create_rental(&self, request: CreateRentalRequest) -> Result<RentalId, RentalError>;

    /// Swap against the leased pool. Returns the output amount.
    fn execute_swap(&self, request: SwapRequest) -> Result<Amount, RentalError>;

    /// Settle through a dual-signed close of the linked channel.
    fn end_rental_with_channel(
        &self,
        rental_id: RentalId,
        caller: Address,
        final_state: SignedBalanceUpdate,
    ) -> Result<RentalSettlement, RentalError>;

    /// Settle a channel-less rental directly from escrow.
    ///
    /// For a channel-backed rental whose channel already settled, refund the
    /// escrow and return the channel's recorded settlement.
    fn end_rental(
        &self,
        rental_id: RentalId,
        caller: Address,
    ) -> Result<RentalSettlement, RentalError>;

    /// Settle through the linked channel's elapsed dispute.
    fn resolve_rental_dispute(
        &self,
        rental_id: RentalId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
    ) -> Result<RentalSettlement, RentalError>;

    /// Copy of a rental.
    fn get_rental(&self, rental_id: RentalId) -> Option<Rental>;

    /// Swap history of a rental, in execution order.
    fn get_swap_history(&self, rental_id: RentalId) -> Result<Vec<SwapRecord>, RentalError>;

    /// Rentals taken by `renter`, by id.
    fn get_renter_rentals(&self, renter: &Address) -> Vec<Rental>;

    /// Pools owned by `owner`.
    fn get_owner_pools(&self, owner: &Address) -> Vec<Pool>;

    /// Profit breakdown. Pure read.
    fn get_rental_profits(&self, rental_id: RentalId) -> Result<ProfitBreakdown, RentalError>;

    /// Active, expired or ended.
    fn rental_status(&self, rental_id: RentalId) -> Result<RentalStatus, RentalError>;
}
