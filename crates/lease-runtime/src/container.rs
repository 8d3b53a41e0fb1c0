//! # Service Container
//!
//! Builds every subsystem in dependency order and hands each one its
//! dependencies as trait objects:
//!
//! ```text
//! ll-01 SignatureVerifier ──┐
//! EscrowVault ──────────────┼──→ ll-02 ChannelLedger ──┐
//! TimeSource ───────────────┤                          ├──→ ll-05 RentalEngine
//!                           └──→ ll-03 PoolRegistry ───┘
//! ```

use crate::config::LeaseConfig;
use crate::persistence::{LeaseSnapshot, SNAPSHOT_VERSION};
use ll_01_signature_verification::EcdsaVerifier;
use ll_02_channel_ledger::{ChannelError, ChannelLedgerService, InMemoryEscrowVault};
use ll_03_pool_registry::PoolRegistryService;
use ll_05_rental_engine::{RentalDependencies, RentalEngineService};
use shared_types::{SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::info;

/// All initialized services.
pub struct LeaseContainer {
    /// Configuration the services were built from.
    pub config: LeaseConfig,
    /// Clock shared by every service.
    pub clock: Arc<dyn TimeSource>,
    /// Escrow backing channel deposits and rental escrow.
    pub vault: Arc<InMemoryEscrowVault>,
    /// ll-02.
    pub ledger: Arc<ChannelLedgerService>,
    /// ll-03.
    pub pools: Arc<PoolRegistryService>,
    /// ll-05.
    pub rentals: Arc<RentalEngineService>,
}

impl LeaseContainer {
    /// Build on the system clock.
    pub fn new(config: LeaseConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Build on an injected clock.
    pub fn with_clock(config: LeaseConfig, clock: Arc<dyn TimeSource>) -> Self {
        let vault = Arc::new(InMemoryEscrowVault::new());
        let ledger = Arc::new(ChannelLedgerService::new(
            config.ledger.clone(),
            Arc::new(EcdsaVerifier::new()),
            vault.clone(),
            clock.clone(),
        ));
        let pools = Arc::new(PoolRegistryService::new(clock.clone()));
        let rentals = Arc::new(RentalEngineService::new(
            config.rental.clone(),
            RentalDependencies {
                ledger: ledger.clone(),
                pools: pools.clone(),
                vault: vault.clone(),
                clock: clock.clone(),
            },
        ));

        info!(
            dispute_window_secs = config.ledger.dispute_window_secs,
            escrow_policy = ?config.rental.escrow_policy,
            "Services initialized"
        );

        Self {
            config,
            clock,
            vault,
            ledger,
            pools,
            rentals,
        }
    }

    /// Capture the durable state of every service.
    pub fn snapshot(&self) -> LeaseSnapshot {
        LeaseSnapshot {
            version: SNAPSHOT_VERSION,
            taken_at: self.clock.now(),
            channels: self.ledger.snapshot(),
            pools: self.pools.snapshot(),
            rentals: self.rentals.snapshot(),
            vault: self.vault.snapshot(),
        }
    }

    /// Reload every service from a snapshot.
    pub fn restore(&self, snapshot: LeaseSnapshot) -> Result<(), ChannelError> {
        self.ledger.restore(snapshot.channels)?;
        self.pools.restore(snapshot.pools);
        self.rentals.restore(snapshot.rentals);
        self.vault.restore(snapshot.vault);
        Ok(())
    }
}
