//! # Domain Entities
//!
//! Core entities for the Channel Ledger.

use super::errors::ChannelError;
use super::invariants::{
    invariant_balance_conservation, invariant_nonce_increasing, DISPUTE_WINDOW_SECS,
};
use super::value_objects::{ChannelStatus, Party, PlatformFee, Resolution};
use ll_01_signature_verification::{keccak256, ChannelMessage, EcdsaSignature, Intent};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChannelId, Hash, Timestamp};

/// Two-party balance channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique identifier.
    pub channel_id: ChannelId,
    /// Depositing participant.
    pub participant_a: Address,
    /// Counterparty.
    pub participant_b: Address,
    /// Current balance of A.
    pub balance_a: Amount,
    /// Current balance of B.
    pub balance_b: Amount,
    /// Deposit fixed at open.
    pub total_deposit: Amount,
    /// Nonce of the last accepted state (0 at open).
    pub nonce: u64,
    /// Lifecycle status.
    pub status: ChannelStatus,
    /// Set while disputed (and kept after resolution).
    pub dispute_deadline: Option<Timestamp>,
    /// External reference the channel was opened for.
    pub reference: Hash,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Intended end of the channel (`created_at + duration`).
    pub expires_at: Timestamp,
    /// Set when the channel becomes terminal.
    pub settled_at: Option<Timestamp>,
    /// Fee terms bound to the channel; applied by every settlement path.
    #[serde(default)]
    pub fee_terms: Option<PlatformFee>,
    /// Funds released when the channel became terminal.
    #[serde(default)]
    pub settlement: Option<ChannelSettlement>,
}

/// Parameters for creating a channel record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelParams {
    /// Unique identifier.
    pub channel_id: ChannelId,
    /// Depositing participant.
    pub participant_a: Address,
    /// Counterparty.
    pub participant_b: Address,
    /// Escrowed deposit.
    pub deposit: Amount,
    /// External reference.
    pub reference: Hash,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Intended end.
    pub expires_at: Timestamp,
}

impl Channel {
    /// Create a new channel with the whole deposit attributed to A.
    pub fn new(params: ChannelParams) -> Self {
        Self {
            channel_id: params.channel_id,
            participant_a: params.participant_a,
            participant_b: params.participant_b,
            balance_a: params.deposit,
            balance_b: Amount::zero(),
            total_deposit: params.deposit,
            nonce: 0,
            status: ChannelStatus::Active,
            dispute_deadline: None,
            reference: params.reference,
            created_at: params.created_at,
            expires_at: params.expires_at,
            settled_at: None,
            fee_terms: None,
            settlement: None,
        }
    }

    /// Not yet closed or resolved (a disputed channel is still active).
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Dispute running.
    pub fn is_disputed(&self) -> bool {
        self.status == ChannelStatus::Disputed
    }

    /// Which side `who` is on, if any.
    pub fn party_of(&self, who: &Address) -> Option<Party> {
        if *who == self.participant_a {
            Some(Party::A)
        } else if *who == self.participant_b {
            Some(Party::B)
        } else {
            None
        }
    }

    /// Address of a side.
    pub fn participant(&self, party: Party) -> Address {
        match party {
            Party::A => self.participant_a,
            Party::B => self.participant_b,
        }
    }

    /// Check that the channel still accepts co-signed states.
    pub fn ensure_open_for_signed_state(&self) -> Result<(), ChannelError> {
        if self.status.is_terminal() {
            return Err(ChannelError::AlreadyTerminal);
        }
        if self.is_disputed() {
            return Err(ChannelError::ChannelDisputed);
        }
        Ok(())
    }

    /// Check balances and nonce of a proposed state without mutating.
    pub fn check_state(
        &self,
        balance_a: Amount,
        balance_b: Amount,
        nonce: u64,
    ) -> Result<(), ChannelError> {
        invariant_balance_conservation(balance_a, balance_b, self.total_deposit)?;
        invariant_nonce_increasing(self.nonce, nonce)
    }

    /// Transition to new status.
    pub fn transition_to(&mut self, new_status: ChannelStatus) -> Result<(), ChannelError> {
        if !self.status.can_transition_to(new_status) {
            return Err(ChannelError::InvalidTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", new_status),
            });
        }
        self.status = new_status;
        Ok(())
    }

    /// Replace balances and nonce after a validated update.
    pub fn apply_update(
        &mut self,
        balance_a: Amount,
        balance_b: Amount,
        nonce: u64,
    ) -> Result<(), ChannelError> {
        self.check_state(balance_a, balance_b, nonce)?;
        self.transition_to(ChannelStatus::Active)?;
        self.balance_a = balance_a;
        self.balance_b = balance_b;
        self.nonce = nonce;
        Ok(())
    }

    /// Bind fee terms to a channel that is still open for co-signed states.
    pub fn attach_fee(&mut self, fee: PlatformFee) -> Result<(), ChannelError> {
        self.ensure_open_for_signed_state()?;
        if !fee.is_valid() {
            return Err(ChannelError::InvalidFee(fee.bps));
        }
        if self.fee_terms.is_some() {
            return Err(ChannelError::FeeAlreadyAttached);
        }
        self.fee_terms = Some(fee);
        Ok(())
    }

    /// Start the dispute clock.
    pub fn start_dispute(
        &mut self,
        now: Timestamp,
        window_secs: u64,
    ) -> Result<Timestamp, ChannelError> {
        match self.status {
            ChannelStatus::Disputed => return Err(ChannelError::AlreadyDisputed),
            status if status.is_terminal() => return Err(ChannelError::AlreadyTerminal),
            _ => {}
        }
        let deadline = now.checked_add(window_secs).ok_or(ChannelError::Overflow)?;
        self.transition_to(ChannelStatus::Disputed)?;
        self.dispute_deadline = Some(deadline);
        Ok(deadline)
    }

    /// Settlement released by a terminal channel.
    ///
    /// Records persisted before settlements were kept on the channel are
    /// rebuilt from the final balances, without a fee.
    pub fn final_settlement(&self) -> Option<ChannelSettlement> {
        if !self.status.is_terminal() {
            return None;
        }
        if let Some(settlement) = &self.settlement {
            return Some(settlement.clone());
        }
        let resolution = match self.status {
            ChannelStatus::Resolved => Resolution::Dispute,
            _ => Resolution::Cooperative,
        };
        Some(ChannelSettlement {
            channel_id: self.channel_id,
            payout_a: self.balance_a,
            payout_b: self.balance_b,
            platform_fee: Amount::zero(),
            fee_recipient: None,
            nonce: self.nonce,
            resolution,
            settled_at: self.settled_at.unwrap_or(self.expires_at),
        })
    }

    /// Record final balances and enter a terminal state.
    pub fn finalize(
        &mut self,
        balance_a: Amount,
        balance_b: Amount,
        resolution: Resolution,
        now: Timestamp,
    ) -> Result<(), ChannelError> {
        let terminal = match resolution {
            Resolution::Cooperative => ChannelStatus::Closed,
            Resolution::Dispute => ChannelStatus::Resolved,
        };
        self.transition_to(terminal)?;
        self.balance_a = balance_a;
        self.balance_b = balance_b;
        self.settled_at = Some(now);
        Ok(())
    }
}

/// Request to open a channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenChannelRequest {
    /// Depositing participant.
    pub participant_a: Address,
    /// Counterparty.
    pub participant_b: Address,
    /// Deposit escrowed from A.
    pub deposit: Amount,
    /// Intended lifetime in seconds.
    pub duration_secs: u64,
    /// External reference (e.g. the lease the channel backs).
    pub reference: Hash,
}

/// A complete, dual-signed channel state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBalanceUpdate {
    /// Target channel.
    pub channel_id: ChannelId,
    /// New balance of A.
    pub balance_a: Amount,
    /// New balance of B.
    pub balance_b: Amount,
    /// New nonce.
    pub nonce: u64,
    /// Signature of participant A.
    pub sig_a: EcdsaSignature,
    /// Signature of participant B.
    pub sig_b: EcdsaSignature,
}

impl SignedBalanceUpdate {
    /// Digest inputs of this state under `intent`.
    pub fn message(&self, intent: Intent) -> ChannelMessage {
        ChannelMessage {
            intent,
            channel_id: self.channel_id,
            balance_a: self.balance_a,
            balance_b: self.balance_b,
            nonce: self.nonce,
        }
    }
}

/// Funds released when a channel becomes terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettlement {
    /// Settled channel.
    pub channel_id: ChannelId,
    /// Released to participant A.
    pub payout_a: Amount,
    /// Released to participant B.
    pub payout_b: Amount,
    /// Carved out for the platform.
    pub platform_fee: Amount,
    /// Fee recipient, if a fee applied.
    pub fee_recipient: Option<Address>,
    /// Nonce of the final state (the last accepted nonce for disputes).
    pub nonce: u64,
    /// How the channel ended.
    pub resolution: Resolution,
    /// Settlement timestamp.
    pub settled_at: Timestamp,
}

/// Channel Ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Grace period before a dispute can be force-resolved.
    pub dispute_window_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            dispute_window_secs: DISPUTE_WINDOW_SECS,
        }
    }
}

/// Derive a channel id from its participants, reference and a sequence number.
pub fn derive_channel_id(
    participant_a: &Address,
    participant_b: &Address,
    reference: &Hash,
    sequence: u64,
) -> ChannelId {
    let mut preimage = Vec::with_capacity(20 + 20 + 32 + 8);
    preimage.extend_from_slice(participant_a);
    preimage.extend_from_slice(participant_b);
    preimage.extend_from_slice(reference);
    preimage.extend_from_slice(&sequence.to_be_bytes());
    keccak256(&preimage)
}
