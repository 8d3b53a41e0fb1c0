//! # LL-04 Settlement Calculator
//!
//! Pure profit and fee accounting over rental records. No state, no I/O:
//! every function maps inputs to a result and can be called any number of
//! times with identical output.
//!
//! **Subsystem ID:** 4
//!
//! ## Formulas
//!
//! ```text
//! gas_cost_estimate = Σ gas_price_i * gas_units_per_swap
//! gross_profit      = total_fees_earned - rental_cost_paid
//! net_profit        = gross_profit - gas_cost_estimate
//! roi_basis_points  = net_profit * 10000 / rental_cost_paid   (0 if cost is 0)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{aggregate, compute_profits, roi_basis_points, split_platform_fee};
pub use domain::{
    FeeSplit, PortfolioSummary, ProfitBreakdown, ProfitInputs, SettlementError, SignedAmount,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
