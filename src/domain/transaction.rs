use std::fmt;
use std::str::FromStr;

use crate::common::{error::LedgerError, money::Money};
use crate::domain::account::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Increases the balance.
    Debit,
    /// Decreases the balance.
    Credit,
}

impl FromStr for Direction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "debit" => Ok(Direction::Debit),
            "c" | "credit" => Ok(Direction::Credit),
            other => Err(LedgerError::InvalidTransactionType(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Debit => f.write_str("Debit"),
            Direction::Credit => f.write_str("Credit"),
        }
    }
}

/// One ledger movement. Immutable after creation; the owning account assigns
/// `id` at insertion time so identifiers stay dense per account after
/// deletions.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: u32,
    pub amount: Money,
    pub direction: Direction,
    /// Free-text label, not a live reference to another account.
    pub related_account: Option<String>,
}

impl Transaction {
    pub fn new(
        amount: Money,
        direction: Direction,
        related_account: Option<String>,
    ) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(Self {
            id: 0,
            amount,
            direction,
            related_account,
        })
    }

    /// Whether applying this transaction to `account` is permissible. False
    /// exactly when a credit would drive the account's own balance negative;
    /// ancestors are never consulted.
    pub fn is_admissible(&self, account: &Account) -> bool {
        !(self.direction == Direction::Credit && account.balance < self.amount)
    }

    /// The balance adjustment this transaction carries: positive for Debit,
    /// negative for Credit.
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Debit => self.amount,
            Direction::Credit => -self.amount,
        }
    }
}
