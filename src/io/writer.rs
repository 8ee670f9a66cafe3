use std::io::{self, Write};

use crate::domain::{account::Account, forest::AccountForest, transaction::Transaction};

/// Indentation step per tree depth in the forest report.
const INDENT: usize = 4;

#[derive(serde::Serialize)]
/// Internal CSV output row for chart snapshots, matching the headers the
/// chart reader expects: `account,description,balance`.
struct ChartRow {
    account: u32,
    description: String,
    balance: String,
}

fn write_transaction<W: Write>(w: &mut W, tx: &Transaction, indent: usize) -> io::Result<()> {
    match &tx.related_account {
        Some(label) => writeln!(
            w,
            "{:indent$}#{} {} {} ({label})",
            "",
            tx.id,
            tx.direction,
            tx.amount
        ),
        None => writeln!(w, "{:indent$}#{} {} {}", "", tx.id, tx.direction, tx.amount),
    }
}

/// Writes the whole forest as an indented, depth-ordered listing.
///
/// Each account renders as `number description balance`, indented by its
/// depth, with its transactions nested beneath. Roots and children appear in
/// account-number order, so output is deterministic.
///
/// # Examples
///
/// ```
/// use account_forest::domain::forest::AccountForest;
/// use account_forest::common::money::Money;
/// use account_forest::io::writer::write_forest;
///
/// let mut forest = AccountForest::new();
/// forest.add_account(1, "Assets".into(), Money::new(100_000)).unwrap();
/// forest.add_account(12, "Cash".into(), Money::zero()).unwrap();
///
/// let mut out = Vec::new();
/// write_forest(&mut out, &forest).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("1 Assets 1000.00\n"));
/// assert!(s.contains("    12 Cash 0.00\n"));
/// ```
pub fn write_forest<W: Write>(mut writer: W, forest: &AccountForest) -> io::Result<()> {
    for (depth, account) in forest.traverse() {
        let indent = depth * INDENT;
        writeln!(
            writer,
            "{:indent$}{} {} {}",
            "", account.number, account.description, account.balance
        )?;
        for tx in account.transactions() {
            write_transaction(&mut writer, tx, indent + 2)?;
        }
    }
    writer.flush()
}

/// Writes one account's number, description and balance followed by its
/// transaction list.
pub fn write_account_details<W: Write>(mut writer: W, account: &Account) -> io::Result<()> {
    writeln!(writer, "Account Number: {}", account.number)?;
    writeln!(writer, "Description: {}", account.description)?;
    writeln!(writer, "Balance: {}", account.balance)?;
    writeln!(writer, "Transactions:")?;
    for tx in account.transactions() {
        write_transaction(&mut writer, tx, 2)?;
    }
    writer.flush()
}

/// Writes a chart snapshot as CSV, sorted by account number.
///
/// The output round-trips through `reader::read_accounts`: the logical
/// fields (number, description, balance) survive a save/load cycle.
pub fn write_chart_csv<W: Write>(writer: W, forest: &AccountForest) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for account in forest.accounts().values() {
        let row = ChartRow {
            account: account.number,
            description: account.description.clone(),
            balance: account.balance.to_string_2dp(),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;
    use crate::domain::transaction::Direction;

    fn money(v: i64) -> Money {
        Money::new(v)
    }

    fn sample_forest() -> AccountForest {
        let mut forest = AccountForest::new();
        forest.add_account(1, "Assets".into(), money(100_000)).unwrap();
        forest.add_account(12, "Cash".into(), money(0)).unwrap();
        forest.add_account(2, "Liabilities".into(), money(0)).unwrap();
        forest
            .add_transaction(12, money(5000), Direction::Debit, Some("float".into()))
            .unwrap();
        forest
    }

    #[test]
    fn forest_report_nests_children_and_transactions() {
        let mut out = Vec::new();
        write_forest(&mut out, &sample_forest()).unwrap();
        let s = String::from_utf8(out).unwrap();

        let expected = "\
1 Assets 1050.00
    12 Cash 50.00
      #1 Debit 50.00 (float)
2 Liabilities 0.00
";
        assert_eq!(s, expected);
    }

    #[test]
    fn account_details_lists_header_then_transactions() {
        let forest = sample_forest();
        let account = forest.search_account(12).unwrap();

        let mut out = Vec::new();
        write_account_details(&mut out, account).unwrap();
        let s = String::from_utf8(out).unwrap();

        let expected = "\
Account Number: 12
Description: Cash
Balance: 50.00
Transactions:
  #1 Debit 50.00 (float)
";
        assert_eq!(s, expected);
    }

    #[test]
    fn chart_snapshot_round_trips_through_the_reader() {
        let forest = sample_forest();

        let mut out = Vec::new();
        write_chart_csv(&mut out, &forest).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("account,description,balance\n"));

        let mut rdr = csv::ReaderBuilder::new().from_reader(s.as_bytes());
        let records: Vec<_> = crate::io::reader::read_accounts(&mut rdr)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].number, 1);
        assert_eq!(records[0].balance, money(105_000));
        assert_eq!(records[1].number, 2);
        assert_eq!(records[2].number, 12);
        assert_eq!(records[2].description, "Cash");
    }
}
