//! Profit, ROI and portfolio aggregation.

use crate::domain::{PortfolioSummary, ProfitBreakdown, ProfitInputs, SettlementError, SignedAmount};
use primitive_types::U512;
use shared_types::{Amount, BPS_DENOMINATOR};

/// Net profit over cost in basis points, truncated toward zero.
///
/// Zero when `cost` is zero. Saturates at the `i128` range.
pub fn roi_basis_points(net_profit: SignedAmount, cost: Amount) -> i128 {
    if cost.is_zero() {
        return 0;
    }
    let scaled = net_profit.magnitude.full_mul(Amount::from(BPS_DENOMINATOR));
    let quotient = scaled / U512::from(cost);
    let magnitude = if quotient > U512::from(i128::MAX as u128) {
        i128::MAX
    } else {
        quotient.low_u128() as i128
    };
    if net_profit.negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Profit breakdown for one rental.
pub fn compute_profits(inputs: &ProfitInputs) -> Result<ProfitBreakdown, SettlementError> {
    let units = Amount::from(inputs.gas_units_per_swap);
    let gas_cost_estimate = inputs
        .gas_prices
        .iter()
        .try_fold(Amount::zero(), |acc, price| {
            price.checked_mul(units).and_then(|cost| acc.checked_add(cost))
        })
        .ok_or(SettlementError::Overflow("gas cost estimate"))?;

    let gross_profit = SignedAmount::difference(inputs.total_fees_earned, inputs.rental_cost_paid);
    let net_profit = gross_profit
        .checked_sub_amount(gas_cost_estimate)
        .ok_or(SettlementError::Overflow("net profit"))?;

    Ok(ProfitBreakdown {
        total_fees_earned: inputs.total_fees_earned,
        rental_cost_paid: inputs.rental_cost_paid,
        gas_cost_estimate,
        gross_profit,
        net_profit,
        roi_basis_points: roi_basis_points(net_profit, inputs.rental_cost_paid),
    })
}

/// Totals across rentals.
pub fn aggregate(breakdowns: &[ProfitBreakdown]) -> Result<PortfolioSummary, SettlementError> {
    breakdowns
        .iter()
        .try_fold(PortfolioSummary::default(), |mut acc, b| {
            acc.rentals += 1;
            if b.net_profit.is_positive() {
                acc.profitable_rentals += 1;
            }
            acc.total_fees_earned = acc
                .total_fees_earned
                .checked_add(b.total_fees_earned)
                .ok_or(SettlementError::Overflow("total fees"))?;
            acc.total_cost_paid = acc
                .total_cost_paid
                .checked_add(b.rental_cost_paid)
                .ok_or(SettlementError::Overflow("total cost"))?;
            acc.total_gas_cost = acc
                .total_gas_cost
                .checked_add(b.gas_cost_estimate)
                .ok_or(SettlementError::Overflow("total gas"))?;
            acc.net_profit = acc
                .net_profit
                .checked_add(b.net_profit)
                .ok_or(SettlementError::Overflow("net profit"))?;
            Ok(acc)
        })
}
