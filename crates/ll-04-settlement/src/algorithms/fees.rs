//! Platform fee split.

use crate::domain::{FeeSplit, SettlementError};
use shared_types::{bps_of, Amount, BPS_DENOMINATOR};

/// Carve `bps` of `share` out for the platform, rounding the fee down.
pub fn split_platform_fee(share: Amount, bps: u64) -> Result<FeeSplit, SettlementError> {
    if bps > BPS_DENOMINATOR {
        return Err(SettlementError::InvalidFee(bps));
    }
    let platform_fee = bps_of(share, bps).ok_or(SettlementError::Overflow("platform fee"))?;
    Ok(FeeSplit {
        to_recipient: share - platform_fee,
        platform_fee,
    })
}
