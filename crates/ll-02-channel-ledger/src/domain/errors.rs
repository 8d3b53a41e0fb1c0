//! # Domain Errors
//!
//! Error types for the Channel Ledger.

use super::value_objects::{EscrowKey, Party};
use shared_types::{short_hex, Address, Amount, ChannelId, ErrorKind, Timestamp};
use thiserror::Error;

/// Escrow vault errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EscrowError {
    /// Owner's free balance does not cover the lock.
    #[error("Insufficient funds for {}: required {required}, available {available}", short_hex(.owner))]
    InsufficientFunds {
        /// Account asked to lock funds
        owner: Address,
        /// Amount requested
        required: Amount,
        /// Free balance at the time of the request
        available: Amount,
    },

    /// Release exceeds what is held in escrow for the key.
    #[error("Release of {requested} exceeds {locked} escrowed for {key}")]
    InsufficientLocked {
        /// Record the release was charged to
        key: EscrowKey,
        /// Total amount requested for release
        requested: Amount,
        /// Amount currently escrowed for the key
        locked: Amount,
    },

    /// Balance arithmetic overflowed.
    #[error("Escrow arithmetic overflow")]
    Overflow,
}

/// Channel Ledger error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// No channel with this id.
    #[error("Channel not found: {}", short_hex(.0))]
    ChannelNotFound(ChannelId),

    /// An active channel already exists for (participant A, participant B, reference).
    #[error("Duplicate channel: {} already active for this pair and reference", short_hex(.0))]
    DuplicateChannel(ChannelId),

    /// Deposit must be positive.
    #[error("Insufficient deposit")]
    InsufficientDeposit,

    /// A channel needs two distinct participants.
    #[error("Participants must be distinct")]
    SameParticipants,

    /// Channel duration must be positive.
    #[error("Invalid channel duration: {0}s")]
    InvalidDuration(u64),

    /// Balances do not sum to the total deposit.
    #[error("Invalid balances: expected total {expected}, got {actual}")]
    InvalidBalances {
        /// Total deposit of the channel
        expected: Amount,
        /// Sum of the submitted balances (saturated on overflow)
        actual: Amount,
    },

    /// Nonce is not strictly greater than the recorded one. Resubmit with the latest state.
    #[error("Stale nonce: submitted {submitted}, current {current}")]
    StaleNonce {
        /// Nonce recorded on the channel
        current: u64,
        /// Nonce in the submission
        submitted: u64,
    },

    /// A participant's signature does not verify.
    #[error("Invalid signature from participant {party:?}")]
    InvalidSignature {
        /// Which participant's signature failed
        party: Party,
    },

    /// Updates and cooperative closes are frozen while a dispute runs.
    #[error("Channel is disputed")]
    ChannelDisputed,

    /// Dispute already started.
    #[error("Channel already disputed")]
    AlreadyDisputed,

    /// Resolution requested for a channel that was never disputed.
    #[error("Channel is not disputed")]
    NotDisputed,

    /// Dispute deadline not yet reached.
    #[error("Dispute window not elapsed: deadline {deadline}, now {now}")]
    DisputeWindowNotElapsed {
        /// Earliest resolution time
        deadline: Timestamp,
        /// Time of the attempt
        now: Timestamp,
    },

    /// Channel is closed or resolved.
    #[error("Channel already terminal")]
    AlreadyTerminal,

    /// Caller is neither participant.
    #[error("Not a channel participant: {}", short_hex(.0))]
    NotParticipant(Address),

    /// Invalid status transition.
    #[error("Invalid channel transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Attempted status
        to: String,
    },

    /// Fee terms are already bound to the channel.
    #[error("Channel already carries fee terms")]
    FeeAlreadyAttached,

    /// Platform fee above 100%.
    #[error("Invalid platform fee: {0} bps")]
    InvalidFee(u64),

    /// Amount arithmetic overflowed.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Escrow vault rejected the movement of funds.
    #[error("Escrow error: {0}")]
    Escrow(#[from] EscrowError),
}

impl EscrowError {
    /// Caller-facing classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EscrowError::InsufficientFunds { .. } | EscrowError::Overflow => ErrorKind::Validation,
            EscrowError::InsufficientLocked { .. } => ErrorKind::State,
        }
    }
}

impl ChannelError {
    /// Caller-facing classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChannelError::InsufficientDeposit
            | ChannelError::SameParticipants
            | ChannelError::InvalidDuration(_)
            | ChannelError::InvalidBalances { .. }
            | ChannelError::StaleNonce { .. }
            | ChannelError::InvalidSignature { .. }
            | ChannelError::InvalidFee(_)
            | ChannelError::Overflow
            | ChannelError::Escrow(_) => ErrorKind::Validation,
            ChannelError::NotParticipant(_) => ErrorKind::Authorization,
            ChannelError::ChannelNotFound(_)
            | ChannelError::DuplicateChannel(_)
            | ChannelError::ChannelDisputed
            | ChannelError::AlreadyDisputed
            | ChannelError::NotDisputed
            | ChannelError::DisputeWindowNotElapsed { .. }
            | ChannelError::AlreadyTerminal
            | ChannelError::FeeAlreadyAttached
            | ChannelError::InvalidTransition { .. } => ErrorKind::State,
        }
    }

    /// Whether resubmitting corrected input can succeed on the same channel.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChannelError::StaleNonce { .. }
                | ChannelError::InvalidSignature { .. }
                | ChannelError::InvalidBalances { .. }
                | ChannelError::DisputeWindowNotElapsed { .. }
        )
    }
}
