//! # Constant Product Math
//!
//! `x * y = k` pricing with the fee taken off the input:
//!
//! ```text
//! amount_out = reserve_out * amount_in * (10000 - fee_bps)
//!            / (reserve_in * 10000 + amount_in * (10000 - fee_bps))
//! ```
//!
//! The fee (`amount_in * fee_bps / 10000`) is withheld from the pool, so the
//! reserves move by `amount_in - fee` in and `amount_out` out. Rounding is
//! always in the pool's favour, so `k` never decreases.

use crate::domain::PoolError;
use shared_types::{bps_of, Amount, BPS_DENOMINATOR};

/// Output amount for `amount_in` against the given reserves.
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_bps: u64,
) -> Result<Amount, PoolError> {
    if fee_bps > BPS_DENOMINATOR {
        return Err(PoolError::InvalidFee(fee_bps));
    }
    if amount_in.is_zero() {
        return Err(PoolError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(PoolError::InsufficientLiquidity);
    }

    let amount_in_with_fee = amount_in
        .checked_mul(Amount::from(BPS_DENOMINATOR - fee_bps))
        .ok_or(PoolError::Overflow)?;
    let numerator = amount_in_with_fee
        .checked_mul(reserve_out)
        .ok_or(PoolError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(Amount::from(BPS_DENOMINATOR))
        .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
        .ok_or(PoolError::Overflow)?;

    Ok(numerator / denominator)
}

/// Fee withheld from a swap input.
pub fn swap_fee(amount_in: Amount, fee_bps: u64) -> Result<Amount, PoolError> {
    if fee_bps > BPS_DENOMINATOR {
        return Err(PoolError::InvalidFee(fee_bps));
    }
    bps_of(amount_in, fee_bps).ok_or(PoolError::Overflow)
}

/// New `(reserve_in, reserve_out)` after a swap.
pub fn apply_swap_to_reserves(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
    fee: Amount,
    amount_out: Amount,
) -> Result<(Amount, Amount), PoolError> {
    let net_in = amount_in.checked_sub(fee).ok_or(PoolError::Overflow)?;
    let new_in = reserve_in.checked_add(net_in).ok_or(PoolError::Overflow)?;
    let new_out = reserve_out
        .checked_sub(amount_out)
        .ok_or(PoolError::InsufficientLiquidity)?;
    Ok((new_in, new_out))
}

/// Pool invariant `reserve0 * reserve1`, `None` if it does not fit in 256 bits.
pub fn constant_product_k(reserve0: Amount, reserve1: Amount) -> Option<Amount> {
    reserve0.checked_mul(reserve1)
}
