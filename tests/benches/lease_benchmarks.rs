//! # Liquidity Lease Benchmarks
//!
//! | Subsystem | Path |
//! |-----------|------|
//! | ll-01 Signature Verification | digest, verify, recover |
//! | ll-05 Rental Engine | amount out, leased swap |

use criterion::{criterion_group, criterion_main};
use ll_tests::benchmarks::{ll_01_signature, ll_05_swaps};

criterion_group!(
    benches,
    ll_01_signature::register_benchmarks,
    ll_05_swaps::register_benchmarks,
);

criterion_main!(benches);
