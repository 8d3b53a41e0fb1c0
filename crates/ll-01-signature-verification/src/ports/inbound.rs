//! # Inbound Ports (Driving Ports / API)
//!
//! The verification contract the channel ledger depends on.

use crate::domain::digest::ChannelMessage;
use crate::domain::entities::{EcdsaSignature, VerificationResult};
use shared_types::Address;

/// Checks that a channel message was signed by `expected_signer`.
///
/// Implementations must be thread-safe (`Send + Sync`) and must never panic:
/// recovery failure, malformed signatures and signer mismatch all yield
/// `false`.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over the canonical digest of `message`.
    fn verify(
        &self,
        message: &ChannelMessage,
        signature: &EcdsaSignature,
        expected_signer: &Address,
    ) -> bool;

    /// Same check, keeping the reason for a rejection.
    fn verify_detailed(
        &self,
        message: &ChannelMessage,
        signature: &EcdsaSignature,
        expected_signer: &Address,
    ) -> VerificationResult;
}
