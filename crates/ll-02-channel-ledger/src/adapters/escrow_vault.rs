//! Escrow Vault Adapter
//!
//! In-memory implementation of the `EscrowVault` port.

use crate::domain::{EscrowError, EscrowKey};
use crate::ports::outbound::EscrowVault;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_types::{short_hex, Address, Amount};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Default)]
struct VaultState {
    free: HashMap<Address, Amount>,
    locked: HashMap<EscrowKey, Amount>,
}

/// Persistable vault contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
    /// Free balances, sorted by account.
    pub balances: Vec<(Address, Amount)>,
    /// Escrow held per record, sorted by key.
    pub locked: Vec<(EscrowKey, Amount)>,
}

/// In-memory escrow vault.
///
/// Tracks free balances per account and escrow per record.
#[derive(Default)]
pub struct InMemoryEscrowVault {
    state: RwLock<VaultState>,
}

impl InMemoryEscrowVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit free balance to an account (seeding / deposits from outside).
    pub fn credit(&self, owner: &Address, amount: Amount) -> Result<(), EscrowError> {
        let mut state = self.state.write();
        let entry = state.free.entry(*owner).or_default();
        *entry = entry.checked_add(amount).ok_or(EscrowError::Overflow)?;
        Ok(())
    }

    /// Copy of all balances.
    pub fn snapshot(&self) -> VaultSnapshot {
        let state = self.state.read();
        let mut balances: Vec<(Address, Amount)> =
            state.free.iter().map(|(k, v)| (*k, *v)).collect();
        balances.sort_by(|x, y| x.0.cmp(&y.0));
        let mut locked: Vec<(EscrowKey, Amount)> =
            state.locked.iter().map(|(k, v)| (*k, *v)).collect();
        locked.sort_by(|x, y| x.0.cmp(&y.0));
        VaultSnapshot { balances, locked }
    }

    /// Replace all balances.
    pub fn restore(&self, snapshot: VaultSnapshot) {
        let mut state = self.state.write();
        state.free = snapshot.balances.into_iter().collect();
        state.locked = snapshot
            .locked
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .collect();
    }
}

impl EscrowVault for InMemoryEscrowVault {
    fn lock(&self, key: EscrowKey, owner: &Address, amount: Amount) -> Result<(), EscrowError> {
        let mut state = self.state.write();
        let available = state.free.get(owner).copied().unwrap_or_default();
        if available < amount {
            return Err(EscrowError::InsufficientFunds {
                owner: *owner,
                required: amount,
                available,
            });
        }
        let held = state.locked.get(&key).copied().unwrap_or_default();
        let held = held.checked_add(amount).ok_or(EscrowError::Overflow)?;
        state.free.insert(*owner, available - amount);
        state.locked.insert(key, held);

        debug!(%key, owner = %short_hex(owner), %amount, "[ll-02] Escrow locked");
        Ok(())
    }

    fn release(&self, key: EscrowKey, payouts: &[(Address, Amount)]) -> Result<(), EscrowError> {
        let requested = payouts
            .iter()
            .try_fold(Amount::zero(), |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or(EscrowError::Overflow)?;

        let mut state = self.state.write();
        let held = state.locked.get(&key).copied().unwrap_or_default();
        if requested > held {
            warn!(%key, %requested, %held, "[ll-02] Release exceeds escrow");
            return Err(EscrowError::InsufficientLocked {
                key,
                requested,
                locked: held,
            });
        }

        // Validate every credit before touching balances.
        let mut credited: HashMap<Address, Amount> = HashMap::new();
        for (to, amount) in payouts {
            let current = match credited.get(to) {
                Some(balance) => *balance,
                None => state.free.get(to).copied().unwrap_or_default(),
            };
            let next = current.checked_add(*amount).ok_or(EscrowError::Overflow)?;
            credited.insert(*to, next);
        }

        let remaining = held - requested;
        if remaining.is_zero() {
            state.locked.remove(&key);
        } else {
            state.locked.insert(key, remaining);
        }
        for (to, balance) in credited {
            state.free.insert(to, balance);
        }

        debug!(%key, payouts = payouts.len(), %requested, "[ll-02] Escrow released");
        Ok(())
    }

    fn locked_for(&self, key: &EscrowKey) -> Amount {
        self.state.read().locked.get(key).copied().unwrap_or_default()
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        self.state.read().free.get(owner).copied().unwrap_or_default()
    }

    fn total_locked(&self) -> Amount {
        // Each key is bounded by what its owner held, so the sum fits.
        self.state
            .read()
            .locked
            .values()
            .fold(Amount::zero(), |acc, amount| acc.saturating_add(*amount))
    }
}
