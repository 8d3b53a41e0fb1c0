//! # Intent Signer
//!
//! The counterparty half of the protocol: each participant signs the
//! canonical digest independently and hands the signature to whoever
//! submits the complete pair.

use super::digest::{ChannelMessage, Intent};
use super::ecdsa::{address_from_pubkey, invert_s, is_low_s};
use super::entities::EcdsaSignature;
use super::errors::SignatureError;
use k256::ecdsa::SigningKey;
use shared_types::{Address, Amount, ChannelId, Hash};

/// secp256k1 signing key bound to a participant address.
pub struct IntentSigner {
    signing_key: SigningKey,
}

impl IntentSigner {
    /// Generate a random key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, SignatureError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| SignatureError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Participant address of this key.
    pub fn address(&self) -> Address {
        address_from_pubkey(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest, always emitting a low-S signature with v in {27, 28}.
    pub fn sign_digest(&self, digest: &Hash) -> Result<EcdsaSignature, SignatureError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| SignatureError::SigningFailed)?;

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        let parity = recid.to_byte() & 1;
        if is_low_s(&s) {
            return Ok(EcdsaSignature { r, s, v: 27 + parity });
        }

        // Normalizing S flips the y-parity of R.
        Ok(EcdsaSignature {
            r,
            s: invert_s(&s),
            v: 27 + (parity ^ 1),
        })
    }

    /// Sign a channel state message.
    pub fn sign_intent(
        &self,
        intent: Intent,
        channel_id: &ChannelId,
        balance_a: Amount,
        balance_b: Amount,
        nonce: u64,
    ) -> Result<EcdsaSignature, SignatureError> {
        let message = ChannelMessage {
            intent,
            channel_id: *channel_id,
            balance_a,
            balance_b,
            nonce,
        };
        self.sign_digest(&message.digest())
    }
}

impl std::fmt::Debug for IntentSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
