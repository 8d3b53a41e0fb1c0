//! # Signature Verification Service
//!
//! Binds the domain `EcdsaVerifier` to the `SignatureVerifier` port.

use crate::domain::digest::ChannelMessage;
use crate::domain::ecdsa::{self, EcdsaVerifier};
use crate::domain::entities::{EcdsaSignature, VerificationResult};
use crate::ports::inbound::SignatureVerifier;
use shared_types::{short_hex, Address};
use tracing::trace;

impl SignatureVerifier for EcdsaVerifier {
    fn verify(
        &self,
        message: &ChannelMessage,
        signature: &EcdsaSignature,
        expected_signer: &Address,
    ) -> bool {
        self.verify_detailed(message, signature, expected_signer)
            .valid
    }

    fn verify_detailed(
        &self,
        message: &ChannelMessage,
        signature: &EcdsaSignature,
        expected_signer: &Address,
    ) -> VerificationResult {
        let result = ecdsa::verify_ecdsa_signer(&message.digest(), signature, expected_signer);
        if let Some(ref error) = result.error {
            trace!(
                channel_id = %short_hex(&message.channel_id),
                intent = ?message.intent,
                signer = %short_hex(expected_signer),
                %error,
                "[ll-01] signature rejected"
            );
        }
        result
    }
}
