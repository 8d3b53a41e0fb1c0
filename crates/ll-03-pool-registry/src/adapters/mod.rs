//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits.

mod static_router;

pub use static_router::StaticRateRouter;
