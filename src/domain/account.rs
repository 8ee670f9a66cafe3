use crate::common::{error::LedgerError, money::Money};
use crate::domain::transaction::{Direction, Transaction};

/// A node in the chart of accounts. Owns its transactions; holds the parent
/// account's number as a non-owning handle into the forest map.
#[derive(Debug, Clone)]
pub struct Account {
    pub number: u32,
    pub description: String,
    pub balance: Money,
    pub parent: Option<u32>,
    transactions: Vec<Transaction>,
    next_id: u32,
}

impl Account {
    pub fn new(number: u32, description: String, initial_balance: Money) -> Self {
        Self {
            number,
            description,
            balance: initial_balance,
            parent: None,
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// One-time structural link set by the forest at creation. No balance
    /// side effects: only transactions added after linkage propagate.
    pub fn set_parent(&mut self, parent: u32) {
        self.parent = Some(parent);
    }

    /// Unconditional signed adjustment. Propagation primitive; validation
    /// happens once, at the point a transaction is accepted.
    pub fn update_balance(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Validates and records a transaction against this account.
    ///
    /// On success returns the assigned id and the signed adjustment already
    /// applied to this account's balance; the forest applies the same
    /// adjustment to every ancestor. On failure nothing changes.
    pub fn add_transaction(
        &mut self,
        amount: Money,
        direction: Direction,
        related_account: Option<String>,
    ) -> Result<(u32, Money), LedgerError> {
        let mut tx = Transaction::new(amount, direction, related_account)?;
        if !tx.is_admissible(self) {
            return Err(LedgerError::InsufficientBalance {
                account: self.number,
                balance: self.balance,
                amount,
            });
        }

        tx.id = self.next_id;
        self.next_id += 1;

        let id = tx.id;
        let adjustment = tx.signed_amount();
        self.transactions.push(tx);
        self.balance += adjustment;
        Ok((id, adjustment))
    }

    /// Reverses and removes a previously recorded transaction.
    ///
    /// Applies the negation of the original signed adjustment to this
    /// account's balance and returns it for ancestor propagation. Remaining
    /// transactions are renumbered densely from 1 and `next_id` restarts one
    /// past the last id; callers must not assume ids survive a removal.
    pub fn remove_transaction(&mut self, tx_id: u32) -> Result<Money, LedgerError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == tx_id)
            .ok_or(LedgerError::TransactionNotFound {
                account: self.number,
                tx: tx_id,
            })?;

        let removed = self.transactions.remove(pos);
        let adjustment = -removed.signed_amount();
        self.balance += adjustment;

        for (i, tx) in self.transactions.iter_mut().enumerate() {
            tx.id = i as u32 + 1;
        }
        self.next_id = self.transactions.len() as u32 + 1;

        Ok(adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(v: i64) -> Money {
        Money::new(v)
    }

    #[test]
    fn add_transaction_assigns_sequential_ids_and_updates_balance() {
        let mut acc = Account::new(10, "Cash".into(), money(0));

        let (id1, adj1) = acc.add_transaction(money(500), Direction::Debit, None).unwrap();
        let (id2, adj2) = acc.add_transaction(money(200), Direction::Credit, None).unwrap();

        assert_eq!((id1, id2), (1, 2));
        assert_eq!(adj1, money(500));
        assert_eq!(adj2, money(-200));
        assert_eq!(acc.balance, money(300));
        assert_eq!(acc.transactions().len(), 2);
    }

    #[test]
    fn credit_exceeding_balance_is_rejected_without_mutation() {
        let mut acc = Account::new(10, "Cash".into(), money(100));

        let err = acc.add_transaction(money(101), Direction::Credit, None).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account: 10,
                balance: money(100),
                amount: money(101),
            }
        );
        assert_eq!(acc.balance, money(100));
        assert!(acc.transactions().is_empty());

        // a rejected candidate must not consume an id either
        let (id, _) = acc.add_transaction(money(50), Direction::Debit, None).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn credit_equal_to_balance_drives_it_to_exactly_zero() {
        let mut acc = Account::new(10, "Cash".into(), money(100));

        acc.add_transaction(money(100), Direction::Credit, None).unwrap();
        assert_eq!(acc.balance, money(0));
    }

    #[test]
    fn remove_transaction_reverses_the_original_adjustment() {
        let mut acc = Account::new(10, "Cash".into(), money(100));

        let (id, _) = acc.add_transaction(money(40), Direction::Debit, None).unwrap();
        assert_eq!(acc.balance, money(140));

        let adjustment = acc.remove_transaction(id).unwrap();
        assert_eq!(adjustment, money(-40));
        assert_eq!(acc.balance, money(100));
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn remove_transaction_renumbers_remaining_ids_densely() {
        let mut acc = Account::new(10, "Cash".into(), money(0));

        for v in [100, 200, 300] {
            acc.add_transaction(money(v), Direction::Debit, None).unwrap();
        }
        acc.remove_transaction(2).unwrap();

        let ids: Vec<u32> = acc.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let amounts: Vec<i64> = acc
            .transactions()
            .iter()
            .map(|t| t.amount.as_i64())
            .collect();
        assert_eq!(amounts, vec![100, 300]);

        // next_id restarts one past the last renumbered id
        let (id, _) = acc.add_transaction(money(400), Direction::Debit, None).unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn remove_unknown_transaction_fails_without_mutation() {
        let mut acc = Account::new(10, "Cash".into(), money(100));
        acc.add_transaction(money(40), Direction::Debit, None).unwrap();

        let err = acc.remove_transaction(9).unwrap_err();
        assert_eq!(
            err,
            LedgerError::TransactionNotFound { account: 10, tx: 9 }
        );
        assert_eq!(acc.balance, money(140));
        assert_eq!(acc.transactions().len(), 1);
    }

    #[test]
    fn balance_equals_initial_plus_signed_amounts() {
        let mut acc = Account::new(10, "Cash".into(), money(1000));

        acc.add_transaction(money(250), Direction::Debit, None).unwrap();
        acc.add_transaction(money(100), Direction::Credit, None).unwrap();
        acc.add_transaction(money(75), Direction::Debit, None).unwrap();

        let sum: i64 = acc
            .transactions()
            .iter()
            .map(|t| t.signed_amount().as_i64())
            .sum();
        assert_eq!(acc.balance, money(1000 + sum));
        assert_eq!(acc.balance, money(1225));
    }
}
