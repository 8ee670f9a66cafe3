use crate::{
    common::{error::LedgerError, event::LedgerEvent},
    domain::{forest::AccountForest, transaction::Direction},
};

/// What a successfully processed event did, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AccountOpened(u32),
    AccountClosed(u32),
    TransactionRecorded { account: u32, tx: u32 },
    TransactionVoided { account: u32, tx: u32 },
}

#[derive(Debug, Default)]
pub struct Processor {}
impl Processor {
    pub fn new() -> Self {
        Self {}
    }

    /// Applies one journal event to the forest. Business-rule rejections come
    /// back unchanged from the forest; the caller decides whether to halt or
    /// skip.
    pub fn process(
        &mut self,
        forest: &mut AccountForest,
        event: LedgerEvent,
    ) -> Result<Outcome, LedgerError> {
        match event {
            LedgerEvent::OpenAccount {
                account,
                description,
                initial_balance,
            } => {
                forest.add_account(account, description, initial_balance)?;
                Ok(Outcome::AccountOpened(account))
            }
            LedgerEvent::CloseAccount { account } => {
                forest.remove_account(account)?;
                Ok(Outcome::AccountClosed(account))
            }
            LedgerEvent::Debit {
                account,
                amount,
                related_account,
            } => {
                let tx = forest.add_transaction(account, amount, Direction::Debit, related_account)?;
                Ok(Outcome::TransactionRecorded { account, tx })
            }
            LedgerEvent::Credit {
                account,
                amount,
                related_account,
            } => {
                let tx =
                    forest.add_transaction(account, amount, Direction::Credit, related_account)?;
                Ok(Outcome::TransactionRecorded { account, tx })
            }
            LedgerEvent::VoidTransaction { account, tx } => {
                forest.remove_transaction(account, tx)?;
                Ok(Outcome::TransactionVoided { account, tx })
            }
        }
    }
}
