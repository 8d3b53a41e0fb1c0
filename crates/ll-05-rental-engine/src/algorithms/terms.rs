//! Lease cost, collateral and escrow amounts.

use crate::domain::{EscrowPolicy, RentalError};
use shared_types::{bps_of, Amount};

/// `duration * price_per_second`.
pub fn rental_cost(duration_secs: u64, price_per_second: Amount) -> Result<Amount, RentalError> {
    price_per_second
        .checked_mul(Amount::from(duration_secs))
        .ok_or(RentalError::Overflow)
}

/// `cost * collateral_ratio_bps / 10000`.
pub fn collateral_for(cost: Amount, collateral_ratio_bps: u64) -> Result<Amount, RentalError> {
    bps_of(cost, collateral_ratio_bps).ok_or(RentalError::Overflow)
}

/// Amount the renter locks under `policy`.
pub fn escrow_required(
    cost: Amount,
    collateral: Amount,
    policy: EscrowPolicy,
) -> Result<Amount, RentalError> {
    match policy {
        EscrowPolicy::CollateralOnly => Ok(collateral),
        EscrowPolicy::CostPlusCollateral => {
            cost.checked_add(collateral).ok_or(RentalError::Overflow)
        }
    }
}
