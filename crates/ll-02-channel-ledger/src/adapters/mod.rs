//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits.

mod escrow_vault;

pub use escrow_vault::{InMemoryEscrowVault, VaultSnapshot};
