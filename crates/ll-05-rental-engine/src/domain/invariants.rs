//! # Domain Invariants
//!
//! Policy checks applied before a rental is created.

use super::entities::RentalConfig;
use super::errors::RentalError;
use shared_types::Amount;

/// Invariant: lease duration within `[min_duration_secs, max_duration_secs]`.
///
/// Together with `duration > 0` this guarantees `end_time > start_time`.
pub fn invariant_duration_in_range(duration: u64, config: &RentalConfig) -> Result<(), RentalError> {
    if duration == 0 || duration < config.min_duration_secs || duration > config.max_duration_secs
    {
        return Err(RentalError::InvalidDuration {
            duration,
            min: config.min_duration_secs,
            max: config.max_duration_secs,
        });
    }
    Ok(())
}

/// Invariant: price per second at most `max_price_per_second`.
pub fn invariant_price_in_range(price: Amount, config: &RentalConfig) -> Result<(), RentalError> {
    if price > config.max_price_per_second {
        return Err(RentalError::PriceOutOfRange {
            price,
            max: config.max_price_per_second,
        });
    }
    Ok(())
}
