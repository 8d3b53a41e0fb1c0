//! # Liquidity Lease Benchmarks
//!
//! Hot paths per subsystem: signature checks on every channel state, and
//! the constant-product math behind every leased swap.

pub mod ll_01_signature;
pub mod ll_05_swaps;
