use crate::common::money::Money;

/// Business-rule violations surfaced by the account forest. Every operation
/// either fully succeeds or fails with one of these without mutating state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account number {0} is out of range (must be 1..=99999)")]
    InvalidAccountNumber(u32),
    #[error("account {0} already exists")]
    DuplicateAccount(u32),
    #[error("account {0} not found")]
    AccountNotFound(u32),
    #[error("invalid transaction type: {0} (use D for Debit or C for Credit)")]
    InvalidTransactionType(String),
    #[error("transaction amount {0} must not be negative")]
    InvalidAmount(Money),
    #[error("insufficient balance on account {account}: balance {balance}, credit {amount}")]
    InsufficientBalance {
        account: u32,
        balance: Money,
        amount: Money,
    },
    #[error("transaction {tx} not found on account {account}")]
    TransactionNotFound { account: u32, tx: u32 },
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing input csv path. usage: cargo run -- <journal.csv> [chart.csv]")]
    MissingArg,
    #[error("failed to open input file: {0}")]
    OpenInput(std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
