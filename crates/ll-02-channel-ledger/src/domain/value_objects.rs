//! # Domain Value Objects
//!
//! Immutable value types for the Channel Ledger.

use serde::{Deserialize, Serialize};
use shared_types::{short_hex, Address, ChannelId, RentalId, BPS_DENOMINATOR};
use std::fmt;

/// One side of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    /// The depositing participant.
    A,
    /// The counterparty.
    B,
}

/// Channel state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelStatus {
    /// Deposit escrowed, accepting co-signed updates.
    #[default]
    Active,
    /// Unilateral dispute running, waiting for the deadline.
    Disputed,
    /// Cooperatively closed with a dual-signed final state.
    Closed,
    /// Force-resolved after the dispute window.
    Resolved,
}

impl ChannelStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: ChannelStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Active)
                | (Self::Active, Self::Closed)
                | (Self::Active, Self::Disputed)
                | (Self::Disputed, Self::Resolved)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Resolved)
    }
}

/// How a channel reached its terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Both parties signed the final state.
    Cooperative,
    /// Dispute window elapsed.
    Dispute,
}

/// Fee carved out of one participant's settled share before release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFee {
    /// Fee rate in basis points of the charged share.
    pub bps: u64,
    /// Account receiving the fee.
    pub recipient: Address,
    /// Whose share pays the fee.
    pub charged_side: Party,
}

impl PlatformFee {
    /// Check the rate is at most 100%.
    pub fn is_valid(&self) -> bool {
        self.bps <= BPS_DENOMINATOR
    }
}

/// Record that a slice of escrow is held for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EscrowKey {
    /// Deposit of a channel.
    Channel(ChannelId),
    /// Collateral of a rental.
    Rental(RentalId),
}

impl fmt::Display for EscrowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscrowKey::Channel(id) => write!(f, "channel:{}", short_hex(id)),
            EscrowKey::Rental(id) => write!(f, "rental:{id}"),
        }
    }
}
