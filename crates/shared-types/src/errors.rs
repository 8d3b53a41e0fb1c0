//! # Error Classification
//!
//! Every subsystem error maps onto one of three caller-facing kinds. None of
//! them is process-fatal.

use serde::{Deserialize, Serialize};

/// How a caller should treat a failed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Bad input (balances, nonce, signature, slippage, range). Resubmit corrected input.
    Validation,
    /// Caller lacks the right to perform the action.
    Authorization,
    /// The record is in the wrong state (expired, terminal, missing, duplicate).
    State,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => f.write_str("validation"),
            ErrorKind::Authorization => f.write_str("authorization"),
            ErrorKind::State => f.write_str("state"),
        }
    }
}
