//! # LL-03 Pool Registry
//!
//! Owns liquidity pool records and executes swaps against them.
//!
//! **Subsystem ID:** 3  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Pool Kinds
//!
//! | Kind | Liquidity | Swap path |
//! |------|-----------|-----------|
//! | `Reserves` | raw `reserve0`/`reserve1` held by the registry | constant product |
//! | `Routed` | external liquidity engine | `SwapRouter` port |
//!
//! The swap fee is never added to the reserves: it is reported back to the
//! caller, who credits it to whoever holds the lease on the pool.
//!
//! ## Module Structure
//!
//! ```text
//! ll-03-pool-registry/
//! ├── domain/          # Pool, PoolKind, SwapOutcome, errors
//! ├── algorithms/      # Constant-product math
//! ├── ports/           # PoolRegistryApi, SwapRouter
//! ├── adapters/        # StaticRateRouter
//! └── service.rs       # PoolRegistryService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::StaticRateRouter;
pub use algorithms::{constant_product_k, get_amount_out, swap_fee};
pub use domain::{
    CreatePoolRequest, Pool, PoolError, PoolKind, RouterError, RouterId, SwapOutcome,
};
pub use ports::{PoolRegistryApi, SwapRouter};
pub use service::PoolRegistryService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
