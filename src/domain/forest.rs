use std::collections::BTreeMap;

use crate::common::{error::LedgerError, money::Money};
use crate::domain::{account::Account, transaction::Direction};

pub const MIN_ACCOUNT_NUMBER: u32 = 1;
pub const MAX_ACCOUNT_NUMBER: u32 = 99999;

/// The registry of all accounts, keyed by account number. Parent links are
/// inferred from the numeric code: stripping the last digit yields the
/// candidate parent, so accounts with no registered prefix become roots.
///
/// An ordered map keeps traversal and reports deterministic by account
/// number without a separate root index.
#[derive(Debug, Default)]
pub struct AccountForest {
    accounts: BTreeMap<u32, Account>,
}

impl AccountForest {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    pub fn accounts(&self) -> &BTreeMap<u32, Account> {
        &self.accounts
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Registers a new account and links it under its inferred parent.
    pub fn add_account(
        &mut self,
        number: u32,
        description: String,
        initial_balance: Money,
    ) -> Result<(), LedgerError> {
        if !(MIN_ACCOUNT_NUMBER..=MAX_ACCOUNT_NUMBER).contains(&number) {
            return Err(LedgerError::InvalidAccountNumber(number));
        }
        if self.accounts.contains_key(&number) {
            return Err(LedgerError::DuplicateAccount(number));
        }

        let mut account = Account::new(number, description, initial_balance);
        let parent_number = number / 10;
        if self.accounts.contains_key(&parent_number) {
            account.set_parent(parent_number);
        }
        self.accounts.insert(number, account);
        Ok(())
    }

    /// Bulk-loads `(number, description, balance)` records. Rejected records
    /// are collected and returned; accepted ones are kept, so a partially bad
    /// load still yields a usable forest.
    pub fn build_from_records<I>(&mut self, records: I) -> Vec<LedgerError>
    where
        I: IntoIterator<Item = (u32, String, Money)>,
    {
        let mut rejected = Vec::new();
        for (number, description, balance) in records {
            if let Err(e) = self.add_account(number, description, balance) {
                rejected.push(e);
            }
        }
        rejected
    }

    /// Removes an account and, deepest first, every account in its subtree,
    /// so no surviving account ever holds a dangling parent reference.
    /// Balances already propagated to surviving ancestors are not rewound.
    pub fn remove_account(&mut self, number: u32) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(&number) {
            return Err(LedgerError::AccountNotFound(number));
        }

        let mut doomed = vec![number];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(
                self.accounts
                    .values()
                    .filter(|a| a.parent == Some(parent))
                    .map(|a| a.number),
            );
            i += 1;
        }
        // children were appended after their parents, so reversing removes
        // deepest first
        for n in doomed.into_iter().rev() {
            self.accounts.remove(&n);
        }
        Ok(())
    }

    /// Records a transaction on the named account and applies its signed
    /// adjustment to every ancestor up to the root. Atomic from the caller's
    /// view: a failed precondition changes no balance anywhere.
    pub fn add_transaction(
        &mut self,
        number: u32,
        amount: Money,
        direction: Direction,
        related_account: Option<String>,
    ) -> Result<u32, LedgerError> {
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(LedgerError::AccountNotFound(number))?;
        let (tx_id, adjustment) = account.add_transaction(amount, direction, related_account)?;
        let parent = account.parent;

        self.propagate(parent, adjustment);
        Ok(tx_id)
    }

    /// Reverses and removes a transaction, mirroring the forward propagation
    /// with the opposite sign.
    pub fn remove_transaction(&mut self, number: u32, tx_id: u32) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(LedgerError::AccountNotFound(number))?;
        let adjustment = account.remove_transaction(tx_id)?;
        let parent = account.parent;

        self.propagate(parent, adjustment);
        Ok(())
    }

    /// Pure lookup; absence is not an error.
    pub fn search_account(&self, number: u32) -> Option<&Account> {
        self.accounts.get(&number)
    }

    /// Depth-first walk over every tree in the forest. Roots and children are
    /// visited in account-number order; each account appears exactly once.
    pub fn traverse(&self) -> Vec<(usize, &Account)> {
        let mut out = Vec::with_capacity(self.accounts.len());
        for account in self.accounts.values().filter(|a| a.parent.is_none()) {
            self.walk(account, 0, &mut out);
        }
        out
    }

    fn walk<'a>(&'a self, account: &'a Account, depth: usize, out: &mut Vec<(usize, &'a Account)>) {
        out.push((depth, account));
        for child in self
            .accounts
            .values()
            .filter(|a| a.parent == Some(account.number))
        {
            self.walk(child, depth + 1, out);
        }
    }

    fn propagate(&mut self, mut cursor: Option<u32>, adjustment: Money) {
        while let Some(number) = cursor {
            // parent links only ever point at registered accounts, but a
            // missing entry must not corrupt the walk
            let Some(account) = self.accounts.get_mut(&number) else {
                break;
            };
            account.update_balance(adjustment);
            cursor = account.parent;
        }
    }
}
