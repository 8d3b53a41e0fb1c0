//! # Domain Entities

use super::value_objects::SignedAmount;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// What a profit calculation needs from a rental record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitInputs {
    /// Swap fees credited to the renter.
    pub total_fees_earned: Amount,
    /// Lease cost (`duration * price_per_second`).
    pub rental_cost_paid: Amount,
    /// Gas price observed at each executed swap.
    pub gas_prices: Vec<Amount>,
    /// Gas units charged per swap.
    pub gas_units_per_swap: u64,
}

/// Profit breakdown for one rental.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    /// Swap fees credited to the renter.
    pub total_fees_earned: Amount,
    /// Lease cost.
    pub rental_cost_paid: Amount,
    /// Estimated gas spent on swaps.
    pub gas_cost_estimate: Amount,
    /// Fees minus cost.
    pub gross_profit: SignedAmount,
    /// Gross profit minus gas.
    pub net_profit: SignedAmount,
    /// Net profit over cost in basis points.
    pub roi_basis_points: i128,
}

/// A share split between its recipient and the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Amount left for the share's owner.
    pub to_recipient: Amount,
    /// Amount taken by the platform.
    pub platform_fee: Amount,
}

/// Totals across many rentals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of breakdowns aggregated.
    pub rentals: usize,
    /// Rentals with a positive net profit.
    pub profitable_rentals: usize,
    /// Sum of fees earned.
    pub total_fees_earned: Amount,
    /// Sum of lease costs.
    pub total_cost_paid: Amount,
    /// Sum of gas estimates.
    pub total_gas_cost: Amount,
    /// Sum of net profits.
    pub net_profit: SignedAmount,
}
