//! # Domain Module
//!
//! Pure cryptographic logic, no I/O.

pub mod digest;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod signer;
