//! # Outbound Ports
//!
//! Custody of escrowed funds.

use crate::domain::{EscrowError, EscrowKey};
use shared_types::{Address, Amount};

/// Escrow vault - outbound port.
///
/// Locked funds belong to no single account until released. Each lock is
/// held under an [`EscrowKey`] and a release can only draw on the funds held
/// under its own key.
pub trait EscrowVault: Send + Sync {
    /// Move `amount` from the owner's free balance into escrow under `key`.
    fn lock(&self, key: EscrowKey, owner: &Address, amount: Amount) -> Result<(), EscrowError>;

    /// Release funds escrowed under `key` to the listed accounts.
    ///
    /// All-or-nothing: either every payout is credited or none is.
    fn release(&self, key: EscrowKey, payouts: &[(Address, Amount)]) -> Result<(), EscrowError>;

    /// Amount currently escrowed under `key`.
    fn locked_for(&self, key: &EscrowKey) -> Amount;

    /// Free (unlocked) balance of an account.
    fn balance_of(&self, owner: &Address) -> Amount;

    /// Total amount currently held in escrow.
    fn total_locked(&self) -> Amount;
}
