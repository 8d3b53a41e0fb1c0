//! # Algorithms Module
//!
//! Lease terms and the advisory pricing curve.

pub mod pricing;
pub mod terms;

pub use pricing::{
    liquidity_discount, quote_price_per_second, quote_rental, PricingInputs, RentalQuote,
};
pub use terms::{collateral_for, escrow_required, rental_cost};
