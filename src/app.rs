use std::io::{stdout, BufWriter};

use tracing::{debug, warn};

use crate::{
    common::error::AppError,
    domain::forest::AccountForest,
    io::{reader, writer},
};

fn open_csv(path: &str) -> Result<csv::Reader<std::fs::File>, AppError> {
    let file = std::fs::File::open(path).map_err(AppError::OpenInput)?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file))
}

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let journal_path = &args[1];

    let mut forest = AccountForest::new();

    // Optional chart snapshot loaded before the journal applies.
    if let Some(chart_path) = args.get(2) {
        let mut chart_reader = open_csv(chart_path)?;
        let mut records = Vec::new();
        for record in reader::read_accounts(&mut chart_reader) {
            match record {
                Ok(r) => records.push((r.number, r.description, r.balance)),
                Err(e) => warn!("skipping malformed chart record: {e}"),
            }
        }
        for e in forest.build_from_records(records) {
            warn!("rejected chart record: {e}");
        }
    }

    let mut journal_reader = open_csv(journal_path)?;
    let mut processor = crate::worker::processor::Processor::new();

    // Malformed rows and business-rule rejections are reported and skipped;
    // the rest of the journal still applies.
    for event in reader::read_events(&mut journal_reader) {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!("skipping malformed journal row: {e}");
                continue;
            }
        };
        match processor.process(&mut forest, event) {
            Ok(outcome) => debug!("applied {outcome:?}"),
            Err(e) => warn!("rejected journal event: {e}"),
        }
    }

    // After processing the journal, write the forest report to stdout
    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    writer::write_forest(writer, &forest)?;

    Ok(())
}
