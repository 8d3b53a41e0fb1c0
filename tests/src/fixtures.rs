//! Shared fixtures: a fully wired node on a manual clock.

use lease_runtime::{LeaseConfig, LeaseContainer};
use ll_01_signature_verification::{Intent, IntentSigner, SignatureError};
use ll_02_channel_ledger::{EscrowError, SignedBalanceUpdate};
use ll_03_pool_registry::{CreatePoolRequest, PoolError, PoolRegistryApi};
use shared_types::{Address, Amount, ChannelId, ManualClock, PoolId, Timestamp, TokenId};
use std::sync::Arc;

/// Start of simulated time.
pub const T0: Timestamp = 1_700_000_000;
/// First pool token.
pub const TOKEN_A: TokenId = [0xA0u8; 20];
/// Second pool token.
pub const TOKEN_B: TokenId = [0xB0u8; 20];

/// Shorthand for small amounts.
pub fn amt(value: u64) -> Amount {
    Amount::from(value)
}

/// Deterministic signer. Seeds 1..=127 give valid secp256k1 keys.
pub fn party(seed: u8) -> Result<IntentSigner, SignatureError> {
    IntentSigner::from_bytes([seed; 32])
}

/// Both halves of a two-party message.
pub fn dual_signed(
    a: &IntentSigner,
    b: &IntentSigner,
    intent: Intent,
    channel_id: ChannelId,
    balance_a: Amount,
    balance_b: Amount,
    nonce: u64,
) -> Result<SignedBalanceUpdate, SignatureError> {
    Ok(SignedBalanceUpdate {
        channel_id,
        balance_a,
        balance_b,
        nonce,
        sig_a: a.sign_intent(intent, &channel_id, balance_a, balance_b, nonce)?,
        sig_b: b.sign_intent(intent, &channel_id, balance_a, balance_b, nonce)?,
    })
}

/// Wired node plus a handle on its clock.
pub struct TestNode {
    /// Simulated time shared by every service.
    pub clock: Arc<ManualClock>,
    /// The services.
    pub node: LeaseContainer,
}

impl TestNode {
    /// Node with default policy.
    pub fn new() -> Self {
        Self::with_config(LeaseConfig::default())
    }

    /// Node with the given policy.
    pub fn with_config(config: LeaseConfig) -> Self {
        let clock = Arc::new(ManualClock::new(T0));
        let node = LeaseContainer::with_clock(config, clock.clone());
        Self { clock, node }
    }

    /// Credit free vault balance.
    pub fn fund(&self, who: &Address, amount: u64) -> Result<(), EscrowError> {
        self.node.vault.credit(who, amt(amount))
    }

    /// Reserve pool over `TOKEN_A`/`TOKEN_B`.
    pub fn pool(&self, owner: &Address, reserve_a: u64, reserve_b: u64) -> Result<PoolId, PoolError> {
        self.node.pools.create_pool(CreatePoolRequest {
            owner: *owner,
            token0: TOKEN_A,
            token1: TOKEN_B,
            reserve0: amt(reserve_a),
            reserve1: amt(reserve_b),
        })
    }
}

impl Default for TestNode {
    fn default() -> Self {
        Self::new()
    }
}
