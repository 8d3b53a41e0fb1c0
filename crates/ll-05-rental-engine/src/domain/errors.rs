//! # Domain Errors

use ll_02_channel_ledger::{ChannelError, EscrowError};
use ll_03_pool_registry::PoolError;
use ll_04_settlement::SettlementError;
use shared_types::{short_hex, Address, Amount, ChannelId, ErrorKind, PoolId, RentalId, Timestamp};
use thiserror::Error;

/// Rental Engine error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RentalError {
    /// No rental with this id.
    #[error("Rental not found: {0}")]
    RentalNotFound(RentalId),

    /// Pool already leased by a live rental.
    #[error("Pool {pool_id} already rented by rental {rental_id}")]
    PoolAlreadyRented {
        /// Pool
        pool_id: PoolId,
        /// Live rental
        rental_id: RentalId,
    },

    /// Duration outside the policy range.
    #[error("Invalid duration {duration}s (allowed {min}..={max})")]
    InvalidDuration {
        /// Requested duration
        duration: u64,
        /// Policy minimum
        min: u64,
        /// Policy maximum
        max: u64,
    },

    /// Price above the policy maximum.
    #[error("Price per second {price} above maximum {max}")]
    PriceOutOfRange {
        /// Requested price
        price: Amount,
        /// Policy maximum
        max: Amount,
    },

    /// Linked channel does not exist.
    #[error("Channel not found: {}", short_hex(.0))]
    ChannelNotFound(ChannelId),

    /// Channel is not an active channel between renter and owner.
    #[error("Channel {} does not match this rental", short_hex(.0))]
    ChannelMismatch(ChannelId),

    /// Channel already backs a rental.
    #[error("Channel {} already linked to rental {rental_id}", short_hex(.channel_id))]
    ChannelAlreadyLinked {
        /// Channel
        channel_id: ChannelId,
        /// Rental it backs
        rental_id: RentalId,
    },

    /// Renter could not escrow the required amount.
    #[error("Insufficient escrow: {0}")]
    InsufficientEscrow(EscrowError),

    /// Escrow release failed.
    #[error("Escrow error: {0}")]
    Escrow(EscrowError),

    /// Only the renter may swap.
    #[error("Caller {} is not the renter", short_hex(.0))]
    NotRenter(Address),

    /// Caller is neither renter nor owner.
    #[error("Caller {} is not authorized to settle", short_hex(.0))]
    NotAuthorized(Address),

    /// Rental already settled.
    #[error("Rental {0} is inactive")]
    RentalInactive(RentalId),

    /// Lease time is over.
    #[error("Rental {rental_id} expired at {end_time} (now {now})")]
    RentalExpired {
        /// Rental
        rental_id: RentalId,
        /// Lease end
        end_time: Timestamp,
        /// Time of the attempt
        now: Timestamp,
    },

    /// Owner may only settle after the lease ends.
    #[error("Rental {rental_id} runs until {end_time} (now {now})")]
    RentalNotExpired {
        /// Rental
        rental_id: RentalId,
        /// Lease end
        end_time: Timestamp,
        /// Time of the attempt
        now: Timestamp,
    },

    /// Channel settlement requested for a rental without a channel.
    #[error("Rental {0} has no channel")]
    NoChannel(RentalId),

    /// Direct settlement requested for a channel-backed rental.
    #[error("Rental {0} settles through its channel")]
    ChannelRequired(RentalId),

    /// Channel Ledger failure.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Pool Registry failure.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// Settlement calculation failure.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Amount arithmetic overflowed.
    #[error("Arithmetic overflow")]
    Overflow,
}

impl RentalError {
    /// Caller-facing classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RentalError::Channel(e) => e.kind(),
            RentalError::Pool(e) => e.kind(),
            RentalError::Settlement(e) => e.kind(),
            RentalError::NotRenter(_) | RentalError::NotAuthorized(_) => ErrorKind::Authorization,
            RentalError::InvalidDuration { .. }
            | RentalError::PriceOutOfRange { .. }
            | RentalError::ChannelMismatch(_)
            | RentalError::InsufficientEscrow(_)
            | RentalError::Escrow(_)
            | RentalError::Overflow => ErrorKind::Validation,
            RentalError::RentalNotFound(_)
            | RentalError::PoolAlreadyRented { .. }
            | RentalError::ChannelNotFound(_)
            | RentalError::ChannelAlreadyLinked { .. }
            | RentalError::RentalInactive(_)
            | RentalError::RentalExpired { .. }
            | RentalError::RentalNotExpired { .. }
            | RentalError::NoChannel(_)
            | RentalError::ChannelRequired(_) => ErrorKind::State,
        }
    }
}
