//! # Shared Types Crate
//!
//! Identifier, amount and time types used across the Liquidity Lease
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Ids, not pointers**: records reference each other by id
//!   (`Rental.channel_id`, `Rental.pool_id`), never by embedded references.
//! - **Explicit time**: every deadline is compared against a `TimeSource`,
//!   so services run unchanged against simulated clocks.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::ErrorKind;
pub use time::{ManualClock, SystemTimeSource, TimeSource};
