//! # Inbound Ports
//!
//! API trait defining what the Channel Ledger can do.

use crate::domain::{
    Channel, ChannelError, ChannelSettlement, OpenChannelRequest, PlatformFee, SignedBalanceUpdate,
};
use shared_types::{Address, Amount, ChannelId, Timestamp};

/// Channel Ledger API - inbound port.
///
/// All operations are validate-and-apply on already received payloads.
/// A failed call never leaves a partially mutated channel behind.
pub trait ChannelLedgerApi: Send + Sync {
    /// Escrow the deposit from participant A and open a channel.
    fn open_channel(&self, request: OpenChannelRequest) -> Result<ChannelId, ChannelError>;

    /// Apply a dual-signed balance update.
    fn update_channel(&self, update: SignedBalanceUpdate) -> Result<(), ChannelError>;

    /// Cooperatively close with a dual-signed final state.
    fn close_channel(&self, update: SignedBalanceUpdate)
        -> Result<ChannelSettlement, ChannelError>;

    /// Cooperative close with a platform fee carved out of one side.
    fn close_channel_with_fee(
        &self,
        update: SignedBalanceUpdate,
        fee: PlatformFee,
    ) -> Result<ChannelSettlement, ChannelError>;

    /// Bind fee terms to an active channel.
    ///
    /// Once attached, every close and dispute resolution of the channel
    /// applies these terms, whoever triggers the settlement. Terms can be
    /// attached only once.
    fn attach_fee(&self, channel_id: ChannelId, fee: PlatformFee) -> Result<(), ChannelError>;

    /// Start a unilateral dispute. Returns the dispute deadline.
    fn start_dispute(
        &self,
        channel_id: ChannelId,
        caller: Address,
    ) -> Result<Timestamp, ChannelError>;

    /// Force-resolve a dispute once its deadline has passed.
    fn resolve_dispute(
        &self,
        channel_id: ChannelId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
    ) -> Result<ChannelSettlement, ChannelError>;

    /// Dispute resolution with a platform fee carved out of one side.
    fn resolve_dispute_with_fee(
        &self,
        channel_id: ChannelId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
        fee: PlatformFee,
    ) -> Result<ChannelSettlement, ChannelError>;

    /// Get a copy of a channel.
    fn get_channel(&self, channel_id: &ChannelId) -> Option<Channel>;

    /// All channels in which `participant` is A or B.
    fn channels_for(&self, participant: &Address) -> Vec<Channel>;
}
