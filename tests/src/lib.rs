//! # Liquidity Lease Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Wired node on a manual clock, deterministic keys
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── ll_01_signature.rs
//! │   └── ll_05_swaps.rs
//! └── integration/      # Cross-subsystem flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ll-tests
//! cargo test -p ll-tests integration::
//! cargo bench -p ll-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
