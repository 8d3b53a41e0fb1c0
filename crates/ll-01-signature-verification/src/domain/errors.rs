//! # Signature Errors
//!
//! Error types for signature recovery and signing.

use shared_types::{Address, ErrorKind};
use thiserror::Error;

/// Errors that can occur during signature recovery or signing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, zero or out-of-range scalar)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch {
        /// Identity the message claims to be signed by
        expected: Address,
        /// Identity actually recovered from the signature
        actual: Address,
    },

    /// Secret key bytes are not a valid secp256k1 scalar
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The signing backend rejected the digest
    #[error("Signing failed")]
    SigningFailed,
}

impl SignatureError {
    /// Caller-facing classification. A bad signature is bad input.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
