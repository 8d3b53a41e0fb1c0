//! # Domain Errors

use shared_types::ErrorKind;
use thiserror::Error;

/// Settlement calculation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettlementError {
    /// Fee rate above 100%.
    #[error("Invalid fee: {0} bps")]
    InvalidFee(u64),

    /// Amount arithmetic overflowed.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl SettlementError {
    /// Caller-facing classification.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
