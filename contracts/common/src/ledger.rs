//! Native Value Ledger
//!
//! Account balances in wei. The ledger only moves value; it never creates
//! or destroys it except through explicit `credit` (genesis funding).

use crate::BTreeMap;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::{StarNotaryError, StarNotaryResult};
use crate::math::{checked_add, checked_sub};
use crate::types::{Address, Wei};

/// Balance book for all accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Ledger {
    balances: BTreeMap<Address, Wei>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account`, zero if never funded
    pub fn balance_of(&self, account: &Address) -> Wei {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Add `amount` to `account`
    pub fn credit(&mut self, account: &Address, amount: Wei) -> StarNotaryResult<()> {
        let new_balance = checked_add(self.balance_of(account), amount)?;
        self.balances.insert(*account, new_balance);
        Ok(())
    }

    /// Remove `amount` from `account`
    pub fn debit(&mut self, account: &Address, amount: Wei) -> StarNotaryResult<()> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(StarNotaryError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        let remaining = checked_sub(available, amount)?;
        if remaining == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, remaining);
        }
        Ok(())
    }

    /// Move `amount` from one account to another
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Wei) -> StarNotaryResult<()> {
        if amount == 0 || from == to {
            // Still require the sender to be able to cover it
            let available = self.balance_of(from);
            if available < amount {
                return Err(StarNotaryError::InsufficientBalance {
                    available,
                    requested: amount,
                });
            }
            return Ok(());
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    /// Sum of all balances
    pub fn total(&self) -> StarNotaryResult<Wei> {
        self.balances
            .values()
            .try_fold(0, |acc, b| checked_add(acc, *b))
    }

    /// Number of accounts holding a nonzero balance
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}
