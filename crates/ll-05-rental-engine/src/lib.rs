//! # LL-05 Rental Engine
//!
//! Time-bounded leases of liquidity pools. The renter escrows collateral,
//! executes swaps against the leased pool for the lease duration and keeps
//! the swap fees; the owner is paid the lease cost at settlement.
//!
//! **Subsystem ID:** 5  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Settlement Paths
//!
//! | Rental | Path | Owner is paid |
//! |--------|------|---------------|
//! | with channel | `end_rental_with_channel` | channel balance B, minus platform fee |
//! | with channel, counterparty silent | `resolve_rental_dispute` | same, after the dispute window |
//! | without channel | `end_rental` | lease cost from escrow, minus platform fee |
//!
//! ## Lock Order
//!
//! rental → pool. Distinct rentals and distinct pools never contend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{
    collateral_for, escrow_required, liquidity_discount, quote_price_per_second, quote_rental,
    rental_cost, PricingInputs, RentalQuote,
};
pub use domain::{
    CreateRentalRequest, CrossDomainRoute, DomainId, EscrowPolicy, Rental, RentalConfig,
    RentalError, RentalRecord, RentalSettlement, RentalStatus, SwapRecord, SwapRequest,
};
pub use ports::{RentalDependencies, RentalEngineApi};
pub use service::RentalEngineService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
