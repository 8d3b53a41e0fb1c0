//! # Algorithms Module
//!
//! Profit and fee calculations.

pub mod fees;
pub mod profits;

pub use fees::split_platform_fee;
pub use profits::{aggregate, compute_profits, roi_basis_points};
