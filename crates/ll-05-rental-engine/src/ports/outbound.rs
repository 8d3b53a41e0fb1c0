//! # Outbound Ports
//!
//! Collaborators the Rental Engine drives.

pub use ll_02_channel_ledger::{ChannelLedgerApi, EscrowVault};
pub use ll_03_pool_registry::PoolRegistryApi;

use shared_types::TimeSource;
use std::sync::Arc;

/// Everything the engine needs from the rest of the system.
#[derive(Clone)]
pub struct RentalDependencies {
    /// Channel settlement.
    pub ledger: Arc<dyn ChannelLedgerApi>,
    /// Pool lookup and swaps.
    pub pools: Arc<dyn PoolRegistryApi>,
    /// Rental escrow.
    pub vault: Arc<dyn EscrowVault>,
    /// Source of "now".
    pub clock: Arc<dyn TimeSource>,
}
