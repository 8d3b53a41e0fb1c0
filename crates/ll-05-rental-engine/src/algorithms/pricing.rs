//! # Advisory Pricing
//!
//! Quotes a price per second before a lease exists:
//!
//! ```text
//! price(t) = base_price · exp(-decay_rate·t) · sqrt(1 + volatility²)
//!          · (1 + tanh(demand)) · liquidity_discount(reserve)
//! ```
//!
//! Display and estimation only. A rental's price is fixed at creation and
//! this curve never touches it.

use super::terms::{collateral_for, escrow_required, rental_cost};
use crate::domain::{RentalConfig, RentalError};
use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Base units per whole token (18 decimals).
const UNIT: f64 = 1e18;

/// Inputs to the advisory curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Price per second at `t = 0`, in base units.
    pub base_price: f64,
    /// Exponential decay per second of elapsed listing time.
    pub decay_rate: f64,
    /// Seconds since the pool was listed.
    pub elapsed_secs: u64,
    /// Recent volatility (fraction, e.g. 0.3).
    pub volatility: f64,
    /// Demand signal, roughly in [-3, 3].
    pub demand: f64,
    /// Pool reserve in base units.
    pub reserve: Amount,
}

/// Integer terms derived from a quoted price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalQuote {
    /// Quoted price per second (floored).
    pub price_per_second: Amount,
    /// Lease cost at that price.
    pub cost: Amount,
    /// Collateral at that price.
    pub collateral: Amount,
    /// Escrow under the configured policy.
    pub escrow: Amount,
}

fn amount_to_f64(amount: Amount) -> f64 {
    amount
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}

/// Discount for deep pools: `max(0.5, 1 / (1 + log10(1 + reserve / 1e18)))`.
pub fn liquidity_discount(reserve: Amount) -> f64 {
    let tokens = amount_to_f64(reserve) / UNIT;
    let discount = 1.0 / (1.0 + (1.0 + tokens).log10());
    discount.max(0.5)
}

/// Price per second from the advisory curve. Never negative.
pub fn quote_price_per_second(inputs: &PricingInputs) -> f64 {
    let decay = (-inputs.decay_rate * inputs.elapsed_secs as f64).exp();
    let volatility = (1.0 + inputs.volatility * inputs.volatility).sqrt();
    let demand = 1.0 + inputs.demand.tanh();
    let price = inputs.base_price * decay * volatility * demand * liquidity_discount(inputs.reserve);
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Quote a lease of `duration_secs` at the curve price.
pub fn quote_rental(
    inputs: &PricingInputs,
    duration_secs: u64,
    config: &RentalConfig,
) -> Result<RentalQuote, RentalError> {
    // Float to int casts saturate, so this is in range.
    let price_per_second = Amount::from(quote_price_per_second(inputs).floor() as u128);
    let cost = rental_cost(duration_secs, price_per_second)?;
    let collateral = collateral_for(cost, config.collateral_ratio_bps)?;
    let escrow = escrow_required(cost, collateral, config.escrow_policy)?;
    Ok(RentalQuote {
        price_per_second,
        cost,
        collateral,
        escrow,
    })
}
