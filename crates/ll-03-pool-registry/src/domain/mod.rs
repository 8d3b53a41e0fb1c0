//! # Domain Module
//!
//! Core domain types for the Pool Registry.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
