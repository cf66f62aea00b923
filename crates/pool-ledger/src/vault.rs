//! Value-transfer seam
//!
//! The ledger never moves funds itself. It asks a [`TokenVault`] to pull entry
//! fees into custody and to pay out of custody, and trusts the result.

use std::collections::{HashMap, HashSet};

use crate::address::Address;
use crate::error::TransferError;

pub trait TokenVault {
    /// Pull `amount` previously approved by `from` into pooled custody.
    fn transfer_in(&mut self, from: &Address, amount: u64) -> Result<(), TransferError>;

    /// Move `amount` out of pooled custody to `to`.
    fn transfer_out(&mut self, to: &Address, amount: u64) -> Result<(), TransferError>;
}

/// Token balances and allowances held in memory, with one pooled custody
/// balance. Used by simulations and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVault {
    balances: HashMap<Address, u64>,
    allowances: HashMap<Address, u64>,
    custody: u64,
    rejected: HashSet<Address>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `to`; saturates at `u64::MAX`.
    pub fn mint(&mut self, to: Address, amount: u64) {
        let balance = self.balances.entry(to).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Allow custody to pull up to `amount` from `owner`.
    pub fn approve(&mut self, owner: Address, amount: u64) {
        self.allowances.insert(owner, amount);
    }

    /// Make every transfer to `addr` fail (frozen or closed account).
    pub fn reject_payments_to(&mut self, addr: Address) {
        self.rejected.insert(addr);
    }

    pub fn accept_payments_to(&mut self, addr: &Address) {
        self.rejected.remove(addr);
    }

    pub fn balance_of(&self, addr: &Address) -> u64 {
        self.balances.get(addr).copied().unwrap_or(0)
    }

    pub fn allowance_of(&self, addr: &Address) -> u64 {
        self.allowances.get(addr).copied().unwrap_or(0)
    }

    pub fn custody(&self) -> u64 {
        self.custody
    }
}

impl TokenVault for InMemoryVault {
    fn transfer_in(&mut self, from: &Address, amount: u64) -> Result<(), TransferError> {
        let approved = self.allowance_of(from);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                approved,
                required: amount,
            });
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                available,
                required: amount,
            });
        }

        let custody = self
            .custody
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow(*from))?;

        self.allowances.insert(*from, approved - amount);
        self.balances.insert(*from, available - amount);
        self.custody = custody;
        Ok(())
    }

    fn transfer_out(&mut self, to: &Address, amount: u64) -> Result<(), TransferError> {
        if self.rejected.contains(to) {
            return Err(TransferError::RecipientRejected(*to));
        }
        if self.custody < amount {
            return Err(TransferError::CustodyShortfall {
                held: self.custody,
                required: amount,
            });
        }

        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow(*to))?;

        self.custody -= amount;
        self.balances.insert(*to, balance);
        Ok(())
    }
}
