//! # Signature Verification Subsystem (LL-01)
//!
//! Recovers and checks a signer's identity against the canonical digest of a
//! channel state message.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): digest encoding, ECDSA recovery, signing
//! - **Ports Layer** (`ports/`): the `SignatureVerifier` trait consumed by the
//!   channel ledger
//! - **Service Layer** (`service.rs`): binds `EcdsaVerifier` to the port
//!
//! ## Security Notes
//!
//! - **Intent separation**: every digest carries an explicit `update`/`close`
//!   tag, so an update signature never satisfies a close and vice versa
//! - **Malleability Prevention (EIP-2)**: signatures with high S are rejected
//! - **Never throws**: malformed input, failed recovery and signer mismatch all
//!   surface as `false` from `SignatureVerifier::verify`

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::digest::{channel_digest, ChannelMessage, Intent, DOMAIN_TAG};
pub use domain::ecdsa::{address_from_pubkey, keccak256, recover_address, EcdsaVerifier};
pub use domain::entities::{EcdsaSignature, VerificationResult};
pub use domain::errors::SignatureError;
pub use domain::signer::IntentSigner;
pub use ports::inbound::SignatureVerifier;
