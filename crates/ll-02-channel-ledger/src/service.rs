//! # Channel Ledger Service
//!
//! Application service implementing `ChannelLedgerApi`.
//!
//! ## Concurrency
//!
//! Channels live in an arena keyed by id, each behind its own mutex. Every
//! mutating call runs check-then-write inside that mutex, so unrelated
//! channels never wait on each other. The duplicate-open index has its own
//! lock and is never held while a channel mutex is being acquired.

use crate::domain::{
    derive_channel_id, invariant_balance_conservation, invariant_dispute_elapsed, Channel,
    ChannelError, ChannelParams, ChannelSettlement, EscrowKey, LedgerConfig, OpenChannelRequest,
    Party, PlatformFee, Resolution, SignedBalanceUpdate,
};
use crate::ports::inbound::ChannelLedgerApi;
use crate::ports::outbound::EscrowVault;
use ll_01_signature_verification::{Intent, SignatureVerifier};
use parking_lot::{Mutex, RwLock};
use shared_types::{bps_of, short_hex, Address, Amount, ChannelId, Hash, TimeSource, Timestamp};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

type OpenKey = (Address, Address, Hash);

/// Channel Ledger service.
pub struct ChannelLedgerService {
    channels: RwLock<HashMap<ChannelId, Arc<Mutex<Channel>>>>,
    /// Live channels by (participant A, participant B, reference).
    open_index: Mutex<HashMap<OpenKey, ChannelId>>,
    sequence: AtomicU64,
    verifier: Arc<dyn SignatureVerifier>,
    vault: Arc<dyn EscrowVault>,
    clock: Arc<dyn TimeSource>,
    config: LedgerConfig,
}

impl ChannelLedgerService {
    /// Create a new ledger.
    pub fn new(
        config: LedgerConfig,
        verifier: Arc<dyn SignatureVerifier>,
        vault: Arc<dyn EscrowVault>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            open_index: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            verifier,
            vault,
            clock,
            config,
        }
    }

    /// Ledger configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of channels ever opened (terminal ones included).
    pub fn channel_count(&self) -> usize {
        self.channels.read().len()
    }

    /// Copy of every channel, ordered by creation.
    pub fn snapshot(&self) -> Vec<Channel> {
        // Collect handles first so no channel mutex is taken under the arena lock.
        let entries: Vec<Arc<Mutex<Channel>>> = self.channels.read().values().cloned().collect();
        let mut all: Vec<Channel> = entries.iter().map(|entry| entry.lock().clone()).collect();
        all.sort_by(|x, y| {
            x.created_at
                .cmp(&y.created_at)
                .then(x.channel_id.cmp(&y.channel_id))
        });
        all
    }

    /// Replace the ledger contents with previously snapshotted channels.
    ///
    /// Escrow balances are restored separately through the vault.
    pub fn restore(&self, channels: Vec<Channel>) -> Result<(), ChannelError> {
        for channel in &channels {
            invariant_balance_conservation(
                channel.balance_a,
                channel.balance_b,
                channel.total_deposit,
            )?;
        }

        let mut index = self.open_index.lock();
        let mut arena = self.channels.write();
        index.clear();
        arena.clear();

        let count = channels.len() as u64;
        for channel in channels {
            if channel.is_active() {
                index.insert(
                    (channel.participant_a, channel.participant_b, channel.reference),
                    channel.channel_id,
                );
            }
            arena.insert(channel.channel_id, Arc::new(Mutex::new(channel)));
        }
        self.sequence.store(count, Ordering::SeqCst);

        info!(channels = count, "[ll-02] Ledger restored");
        Ok(())
    }

    fn entry(&self, channel_id: &ChannelId) -> Result<Arc<Mutex<Channel>>, ChannelError> {
        self.channels
            .read()
            .get(channel_id)
            .cloned()
            .ok_or(ChannelError::ChannelNotFound(*channel_id))
    }

    fn verify_pair(
        &self,
        channel: &Channel,
        update: &SignedBalanceUpdate,
        intent: Intent,
    ) -> Result<(), ChannelError> {
        let message = update.message(intent);
        for (party, signature) in [(Party::A, &update.sig_a), (Party::B, &update.sig_b)] {
            if !self
                .verifier
                .verify(&message, signature, &channel.participant(party))
            {
                warn!(
                    channel_id = %short_hex(&channel.channel_id),
                    ?party,
                    ?intent,
                    "[ll-02] Rejected signature"
                );
                return Err(ChannelError::InvalidSignature { party });
            }
        }
        Ok(())
    }

    /// Validate a signed state against a locked channel, logging rejections.
    fn validate_signed_state(
        &self,
        channel: &Channel,
        update: &SignedBalanceUpdate,
        intent: Intent,
    ) -> Result<(), ChannelError> {
        channel.ensure_open_for_signed_state()?;
        if let Err(err) = channel.check_state(update.balance_a, update.balance_b, update.nonce) {
            warn!(
                channel_id = %short_hex(&channel.channel_id),
                nonce = update.nonce,
                current = channel.nonce,
                ?intent,
                error = %err,
                "[ll-02] Rejected channel state"
            );
            return Err(err);
        }
        self.verify_pair(channel, update, intent)
    }

    fn release_index(&self, channel: &Channel) {
        let key = (channel.participant_a, channel.participant_b, channel.reference);
        let mut index = self.open_index.lock();
        if index.get(&key) == Some(&channel.channel_id) {
            index.remove(&key);
        }
    }

    /// Finalize a locked channel and release its escrow.
    ///
    /// The record is only replaced after the vault accepted the payouts. The
    /// returned settlement is also kept on the channel.
    #[allow(clippy::too_many_arguments)]
    fn settle(
        &self,
        channel: &mut Channel,
        balance_a: Amount,
        balance_b: Amount,
        nonce: u64,
        fee: Option<PlatformFee>,
        resolution: Resolution,
        now: Timestamp,
    ) -> Result<ChannelSettlement, ChannelError> {
        let split = split_fee(balance_a, balance_b, fee)?;
        let settlement = ChannelSettlement {
            channel_id: channel.channel_id,
            payout_a: split.payout_a,
            payout_b: split.payout_b,
            platform_fee: split.platform_fee,
            fee_recipient: fee.map(|f| f.recipient),
            nonce,
            resolution,
            settled_at: now,
        };

        let mut next = channel.clone();
        next.finalize(balance_a, balance_b, resolution, now)?;
        next.nonce = nonce;
        next.settlement = Some(settlement.clone());

        let mut payouts = Vec::with_capacity(3);
        if !split.payout_a.is_zero() {
            payouts.push((channel.participant_a, split.payout_a));
        }
        if !split.payout_b.is_zero() {
            payouts.push((channel.participant_b, split.payout_b));
        }
        if let Some(fee) = fee.filter(|_| !split.platform_fee.is_zero()) {
            payouts.push((fee.recipient, split.platform_fee));
        }
        self.vault
            .release(EscrowKey::Channel(channel.channel_id), &payouts)?;

        *channel = next;
        self.release_index(channel);
        Ok(settlement)
    }

    fn close_inner(
        &self,
        update: SignedBalanceUpdate,
        fee: Option<PlatformFee>,
    ) -> Result<ChannelSettlement, ChannelError> {
        if let Some(fee) = fee.filter(|f| !f.is_valid()) {
            return Err(ChannelError::InvalidFee(fee.bps));
        }
        let entry = self.entry(&update.channel_id)?;
        let mut channel = entry.lock();
        self.validate_signed_state(&channel, &update, Intent::Close)?;

        let fee = channel.fee_terms.or(fee);
        let now = self.clock.now();
        let settlement = self.settle(
            &mut channel,
            update.balance_a,
            update.balance_b,
            update.nonce,
            fee,
            Resolution::Cooperative,
            now,
        )?;

        info!(
            channel_id = %short_hex(&update.channel_id),
            nonce = update.nonce,
            payout_a = %settlement.payout_a,
            payout_b = %settlement.payout_b,
            platform_fee = %settlement.platform_fee,
            "[ll-02] Channel closed"
        );
        Ok(settlement)
    }

    fn resolve_inner(
        &self,
        channel_id: ChannelId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
        fee: Option<PlatformFee>,
    ) -> Result<ChannelSettlement, ChannelError> {
        if let Some(fee) = fee.filter(|f| !f.is_valid()) {
            return Err(ChannelError::InvalidFee(fee.bps));
        }
        let entry = self.entry(&channel_id)?;
        let mut channel = entry.lock();

        if channel.party_of(&caller).is_none() {
            return Err(ChannelError::NotParticipant(caller));
        }
        if channel.status.is_terminal() {
            return Err(ChannelError::AlreadyTerminal);
        }
        let deadline = match (channel.is_disputed(), channel.dispute_deadline) {
            (true, Some(deadline)) => deadline,
            _ => return Err(ChannelError::NotDisputed),
        };
        let now = self.clock.now();
        invariant_dispute_elapsed(deadline, now)?;
        invariant_balance_conservation(final_balance_a, final_balance_b, channel.total_deposit)?;

        let nonce = channel.nonce;
        let fee = channel.fee_terms.or(fee);
        let settlement = self.settle(
            &mut channel,
            final_balance_a,
            final_balance_b,
            nonce,
            fee,
            Resolution::Dispute,
            now,
        )?;

        info!(
            channel_id = %short_hex(&channel_id),
            resolver = %short_hex(&caller),
            payout_a = %settlement.payout_a,
            payout_b = %settlement.payout_b,
            "[ll-02] Dispute resolved"
        );
        Ok(settlement)
    }
}

struct FeeSplit {
    payout_a: Amount,
    payout_b: Amount,
    platform_fee: Amount,
}

fn split_fee(
    balance_a: Amount,
    balance_b: Amount,
    fee: Option<PlatformFee>,
) -> Result<FeeSplit, ChannelError> {
    let Some(fee) = fee else {
        return Ok(FeeSplit {
            payout_a: balance_a,
            payout_b: balance_b,
            platform_fee: Amount::zero(),
        });
    };
    let charged = match fee.charged_side {
        Party::A => balance_a,
        Party::B => balance_b,
    };
    let platform_fee = bps_of(charged, fee.bps).ok_or(ChannelError::Overflow)?;
    let (payout_a, payout_b) = match fee.charged_side {
        Party::A => (balance_a - platform_fee, balance_b),
        Party::B => (balance_a, balance_b - platform_fee),
    };
    Ok(FeeSplit {
        payout_a,
        payout_b,
        platform_fee,
    })
}

impl ChannelLedgerApi for ChannelLedgerService {
    fn open_channel(&self, request: OpenChannelRequest) -> Result<ChannelId, ChannelError> {
        if request.deposit.is_zero() {
            return Err(ChannelError::InsufficientDeposit);
        }
        if request.participant_a == request.participant_b {
            return Err(ChannelError::SameParticipants);
        }
        if request.duration_secs == 0 {
            return Err(ChannelError::InvalidDuration(request.duration_secs));
        }

        let key = (
            request.participant_a,
            request.participant_b,
            request.reference,
        );
        let mut index = self.open_index.lock();
        if let Some(existing) = index.get(&key) {
            return Err(ChannelError::DuplicateChannel(*existing));
        }

        let now = self.clock.now();
        let expires_at = now
            .checked_add(request.duration_secs)
            .ok_or(ChannelError::Overflow)?;
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let channel_id = derive_channel_id(
            &request.participant_a,
            &request.participant_b,
            &request.reference,
            sequence,
        );

        self.vault.lock(
            EscrowKey::Channel(channel_id),
            &request.participant_a,
            request.deposit,
        )?;

        let channel = Channel::new(ChannelParams {
            channel_id,
            participant_a: request.participant_a,
            participant_b: request.participant_b,
            deposit: request.deposit,
            reference: request.reference,
            created_at: now,
            expires_at,
        });
        self.channels
            .write()
            .insert(channel_id, Arc::new(Mutex::new(channel)));
        index.insert(key, channel_id);

        info!(
            channel_id = %short_hex(&channel_id),
            participant_a = %short_hex(&request.participant_a),
            participant_b = %short_hex(&request.participant_b),
            deposit = %request.deposit,
            expires_at,
            "[ll-02] Channel opened"
        );
        Ok(channel_id)
    }

    fn update_channel(&self, update: SignedBalanceUpdate) -> Result<(), ChannelError> {
        let entry = self.entry(&update.channel_id)?;
        let mut channel = entry.lock();
        self.validate_signed_state(&channel, &update, Intent::Update)?;
        channel.apply_update(update.balance_a, update.balance_b, update.nonce)?;

        debug!(
            channel_id = %short_hex(&update.channel_id),
            nonce = update.nonce,
            balance_a = %update.balance_a,
            balance_b = %update.balance_b,
            "[ll-02] Channel updated"
        );
        Ok(())
    }

    fn close_channel(
        &self,
        update: SignedBalanceUpdate,
    ) -> Result<ChannelSettlement, ChannelError> {
        self.close_inner(update, None)
    }

    fn close_channel_with_fee(
        &self,
        update: SignedBalanceUpdate,
        fee: PlatformFee,
    ) -> Result<ChannelSettlement, ChannelError> {
        self.close_inner(update, Some(fee))
    }

    fn attach_fee(&self, channel_id: ChannelId, fee: PlatformFee) -> Result<(), ChannelError> {
        let entry = self.entry(&channel_id)?;
        let mut channel = entry.lock();
        channel.attach_fee(fee)?;

        debug!(
            channel_id = %short_hex(&channel_id),
            bps = fee.bps,
            recipient = %short_hex(&fee.recipient),
            "[ll-02] Fee terms attached"
        );
        Ok(())
    }

    fn start_dispute(
        &self,
        channel_id: ChannelId,
        caller: Address,
    ) -> Result<Timestamp, ChannelError> {
        let entry = self.entry(&channel_id)?;
        let mut channel = entry.lock();
        if channel.party_of(&caller).is_none() {
            return Err(ChannelError::NotParticipant(caller));
        }
        let deadline = channel.start_dispute(self.clock.now(), self.config.dispute_window_secs)?;

        info!(
            channel_id = %short_hex(&channel_id),
            disputer = %short_hex(&caller),
            deadline,
            "[ll-02] Dispute started"
        );
        Ok(deadline)
    }

    fn resolve_dispute(
        &self,
        channel_id: ChannelId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
    ) -> Result<ChannelSettlement, ChannelError> {
        self.resolve_inner(channel_id, caller, final_balance_a, final_balance_b, None)
    }

    fn resolve_dispute_with_fee(
        &self,
        channel_id: ChannelId,
        caller: Address,
        final_balance_a: Amount,
        final_balance_b: Amount,
        fee: PlatformFee,
    ) -> Result<ChannelSettlement, ChannelError> {
        self.resolve_inner(
            channel_id,
            caller,
            final_balance_a,
            final_balance_b,
            Some(fee),
        )
    }

    fn get_channel(&self, channel_id: &ChannelId) -> Option<Channel> {
        let entry = self.channels.read().get(channel_id).cloned()?;
        let channel = entry.lock().clone();
        Some(channel)
    }

    fn channels_for(&self, participant: &Address) -> Vec<Channel> {
        self.snapshot()
            .into_iter()
            .filter(|c| c.party_of(participant).is_some())
            .collect()
    }
}
