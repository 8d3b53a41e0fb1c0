//! # Domain Invariants
//!
//! Business rules for the Channel Ledger.

use super::errors::ChannelError;
use shared_types::{Amount, Timestamp};

/// Default dispute window (24 hours).
pub const DISPUTE_WINDOW_SECS: u64 = 24 * 3600;

/// Invariant: balance conservation.
///
/// `balance_a + balance_b == total_deposit` for every accepted state.
pub fn invariant_balance_conservation(
    balance_a: Amount,
    balance_b: Amount,
    total_deposit: Amount,
) -> Result<(), ChannelError> {
    let (sum, overflowed) = balance_a.overflowing_add(balance_b);
    if overflowed || sum != total_deposit {
        return Err(ChannelError::InvalidBalances {
            expected: total_deposit,
            actual: if overflowed { Amount::MAX } else { sum },
        });
    }
    Ok(())
}

/// Invariant: strictly increasing nonce.
pub fn invariant_nonce_increasing(current: u64, submitted: u64) -> Result<(), ChannelError> {
    if submitted <= current {
        return Err(ChannelError::StaleNonce { current, submitted });
    }
    Ok(())
}

/// Invariant: disputes resolve only at or after their deadline.
pub fn invariant_dispute_elapsed(deadline: Timestamp, now: Timestamp) -> Result<(), ChannelError> {
    if now < deadline {
        return Err(ChannelError::DisputeWindowNotElapsed { deadline, now });
    }
    Ok(())
}
