//! # Canonical Channel Digest
//!
//! Fixed, field-order-sensitive encoding of a channel state message.
//!
//! ```text
//! DOMAIN_TAG || len(tag) || tag || channel_id || be256(balance_a) || be256(balance_b) || be64(nonce)
//! ```
//!
//! The intent tag is part of the signed bytes: a signature over an `update`
//! message can never satisfy a `close` check and vice versa.

use super::ecdsa::keccak256;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, ChannelId, Hash};

/// Domain separator prefixed to every channel message.
pub const DOMAIN_TAG: &[u8] = b"\x19Liquidity Lease Channel:\n";

/// What the co-signed state is meant to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Replace balances and nonce, channel stays open.
    Update,
    /// Final balances, channel becomes terminal.
    Close,
}

impl Intent {
    /// Tag bytes mixed into the digest.
    pub fn tag(&self) -> &'static [u8] {
        match self {
            Intent::Update => b"update",
            Intent::Close => b"close",
        }
    }
}

/// The digest inputs of one channel state message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Update or close.
    pub intent: Intent,
    /// Channel the state belongs to.
    pub channel_id: ChannelId,
    /// Balance of participant A.
    pub balance_a: Amount,
    /// Balance of participant B.
    pub balance_b: Amount,
    /// State nonce.
    pub nonce: u64,
}

impl ChannelMessage {
    /// Canonical byte encoding.
    pub fn encode(&self) -> Vec<u8> {
        let tag = self.intent.tag();
        let mut out = Vec::with_capacity(DOMAIN_TAG.len() + 1 + tag.len() + 32 + 32 + 32 + 8);
        out.extend_from_slice(DOMAIN_TAG);
        out.push(tag.len() as u8);
        out.extend_from_slice(tag);
        out.extend_from_slice(&self.channel_id);

        let mut word = [0u8; 32];
        self.balance_a.to_big_endian(&mut word);
        out.extend_from_slice(&word);
        self.balance_b.to_big_endian(&mut word);
        out.extend_from_slice(&word);

        out.extend_from_slice(&self.nonce.to_be_bytes());
        out
    }

    /// keccak256 of the canonical encoding.
    pub fn digest(&self) -> Hash {
        keccak256(&self.encode())
    }
}

/// Digest of `(intent, channel_id, balance_a, balance_b, nonce)`.
pub fn channel_digest(
    intent: Intent,
    channel_id: &ChannelId,
    balance_a: Amount,
    balance_b: Amount,
    nonce: u64,
) -> Hash {
    ChannelMessage {
        intent,
        channel_id: *channel_id,
        balance_a,
        balance_b,
        nonce,
    }
    .digest()
}
