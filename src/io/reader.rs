use crate::common::{event::LedgerEvent, money::Money};
use crate::domain::transaction::Direction;
use std::{io::Read, str::FromStr};

/// One validated chart-of-accounts record, ready for `build_from_records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub number: u32,
    pub description: String,
    pub balance: Money,
}

#[derive(serde::Deserialize)]
/// Internal CSV row for chart files with headers `account,description,balance`.
struct ChartRow {
    account: u32,
    description: String,
    balance: String,
}

#[derive(serde::Deserialize)]
/// Internal CSV row for journal files with headers `op,account,description,amount,tx`.
/// Columns not used by an op stay empty.
struct JournalRow {
    op: String,
    account: u32,
    description: Option<String>,
    // blank for close/void rows
    amount: Option<String>,
    // only used by void rows
    tx: Option<u32>,
}

/// Reads chart-of-accounts records from a CSV reader.
///
/// Expected headers: `account,description,balance`. Malformed rows become
/// `Err` items with row context; the caller decides whether to skip or halt.
///
/// # Examples
///
/// ```
/// use account_forest::io::reader::read_accounts;
/// use csv::ReaderBuilder;
///
/// let data = "account,description,balance\n\
/// 1,Assets,1000.00\n\
/// 12,Cash,0.00\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let records: Vec<_> = read_accounts(&mut rdr).collect();
///
/// assert_eq!(records[0].as_ref().unwrap().number, 1);
/// assert_eq!(records[1].as_ref().unwrap().description, "Cash");
/// ```
pub fn read_accounts<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<AccountRecord, String>> + '_ {
    rdr.deserialize::<ChartRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let balance = Money::from_str(&row.balance)
            .map_err(|e| format!("bad balance for account {}: {e}", row.account))?;
        Ok(AccountRecord {
            number: row.account,
            description: row.description,
            balance,
        })
    })
}

/// Reads and validates journal rows from a CSV reader.
///
/// Supported headers: `op,account,description,amount,tx`. Known ops are
/// `open`, `close` and `void`; anything else is parsed as a transaction
/// direction (`debit`/`credit`, `d`/`c`). `open`, `debit` and `credit`
/// require the `amount` column, `void` requires `tx`; errors carry the
/// offending account for context.
///
/// # Examples
///
/// ```
/// use account_forest::io::reader::read_events;
/// use account_forest::common::event::LedgerEvent;
/// use csv::ReaderBuilder;
///
/// let data = "op,account,description,amount,tx\n\
/// open,1,Assets,1000.00,\n\
/// debit,1,,50.00,\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let events: Vec<_> = read_events(&mut rdr).collect();
///
/// assert!(matches!(events[0], Ok(LedgerEvent::OpenAccount { account: 1, .. })));
/// assert!(matches!(events[1], Ok(LedgerEvent::Debit { account: 1, .. })));
/// ```
pub fn read_events<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<LedgerEvent, String>> + '_ {
    rdr.deserialize::<JournalRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let op = row.op.trim().to_ascii_lowercase();

        match op.as_str() {
            "open" => {
                let amt_str = row
                    .amount
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| format!("open missing balance for account {}", row.account))?;
                let initial_balance = Money::from_str(&amt_str).map_err(|e| e.to_string())?;
                Ok(LedgerEvent::OpenAccount {
                    account: row.account,
                    description: row.description.unwrap_or_default(),
                    initial_balance,
                })
            }
            "close" => Ok(LedgerEvent::CloseAccount {
                account: row.account,
            }),
            "void" => {
                let tx = row
                    .tx
                    .ok_or_else(|| format!("void missing tx id for account {}", row.account))?;
                Ok(LedgerEvent::VoidTransaction {
                    account: row.account,
                    tx,
                })
            }
            other => {
                let direction = Direction::from_str(other).map_err(|e| e.to_string())?;
                let amt_str = row.amount.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
                    format!("{direction} missing amount for account {}", row.account)
                })?;
                let amount = Money::from_str(&amt_str).map_err(|e| e.to_string())?;
                // the description column doubles as the counterparty label
                let related_account = row.description.filter(|s| !s.trim().is_empty());
                match direction {
                    Direction::Debit => Ok(LedgerEvent::Debit {
                        account: row.account,
                        amount,
                        related_account,
                    }),
                    Direction::Credit => Ok(LedgerEvent::Credit {
                        account: row.account,
                        amount,
                        related_account,
                    }),
                }
            }
        }
    })
}
