use crate::common::money::Money;

/// Represents one journal row, sent from the reader to the worker for
/// processing against the account forest.
#[derive(Debug)]
pub enum LedgerEvent {
    OpenAccount {
        account: u32,
        description: String,
        initial_balance: Money,
    },
    CloseAccount {
        account: u32,
    },
    Debit {
        account: u32,
        amount: Money,
        /// Free-text counterparty label carried onto the transaction.
        related_account: Option<String>,
    },
    Credit {
        account: u32,
        amount: Money,
        related_account: Option<String>,
    },
    VoidTransaction {
        account: u32,
        tx: u32,
    },
}
