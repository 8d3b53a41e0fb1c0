//! # LL-02 Channel Ledger
//!
//! Bilateral balance channels updated off-chain with proof of mutual consent.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Escrow a deposit jointly owned by two participants
//! - Accept co-signed balance updates, strictly ordered by nonce
//! - Cooperative close with an intent-tagged final state
//! - Unilateral dispute that force-resolves after a fixed window
//!
//! ## Lifecycle
//!
//! ```text
//! open ──→ Active ──update──→ Active ──close──→ Closed
//!             │
//!             └──start_dispute──→ Disputed ──(deadline)──resolve──→ Resolved
//! ```
//!
//! `Closed` and `Resolved` are terminal.
//!
//! ## Module Structure
//!
//! ```text
//! ll-02-channel-ledger/
//! ├── domain/          # Channel, ChannelStatus, invariants, errors
//! ├── ports/           # ChannelLedgerApi, EscrowVault
//! ├── adapters/        # InMemoryEscrowVault
//! └── service.rs       # ChannelLedgerService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryEscrowVault, VaultSnapshot};
pub use domain::{
    derive_channel_id, invariant_balance_conservation, invariant_dispute_elapsed,
    invariant_nonce_increasing, Channel, ChannelError, ChannelParams, ChannelSettlement,
    ChannelStatus, EscrowError, EscrowKey, LedgerConfig, OpenChannelRequest, Party, PlatformFee,
    Resolution, SignedBalanceUpdate, DISPUTE_WINDOW_SECS,
};
pub use ports::{ChannelLedgerApi, EscrowVault};
pub use service::ChannelLedgerService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
