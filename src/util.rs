use crate::dto::{MatchResult, Record};
use crate::error::DedupError;
use csv::{Reader, WriterBuilder};
use rustc_hash::FxHashSet;
use std::io;

pub const MATCH_HEADERS: [&str; 4] = ["Source Contact ID", "Match Contact ID", "Accuracy", "Score"];

/// Stream-level failures (I/O, ragged rows, bad UTF-8) are `Io`; anything
/// else the codec rejects is `InvalidInput`.
fn csv_error(err: csv::Error) -> DedupError {
    let stream_error = matches!(
        err.kind(),
        csv::ErrorKind::Io(_) | csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. }
    );
    if stream_error {
        DedupError::io(err)
    } else {
        DedupError::invalid_input(err)
    }
}

///
/// Reads contact rows from CSV with a header line.
///
/// Rows that do not fit the contact shape, and repeated contact ids, are
/// rejected here so the matcher only ever sees well-formed records.
///
pub fn read_records<R: io::Read>(source: R) -> Result<Vec<Record>, DedupError> {
    let mut reader = Reader::from_reader(source);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let records: Vec<Record> = reader
        .records()
        .enumerate()
        .map(|(idx, row)| match row {
            Ok(row) => row.deserialize(Some(&headers)).map_err(|err| {
                DedupError::invalid_input(format!(
                    "line {}: {err}; file must contain columns 'contactID' (integer), 'name', 'name1' and 'email'",
                    idx + 2
                ))
            }),
            Err(err) => Err(csv_error(err)),
        })
        .collect::<Result<_, _>>()?;
    check_unique_ids(&records)?;
    Ok(records)
}

fn check_unique_ids(records: &[Record]) -> Result<(), DedupError> {
    let mut seen = FxHashSet::default();
    for record in records {
        if !seen.insert(record.id) {
            return Err(DedupError::invalid_input(format!(
                "contactID {} appears more than once",
                record.id
            )));
        }
    }
    Ok(())
}

/// Writes the header row followed by one row per match.
pub fn write_matches<W: io::Write>(sink: W, matches: &[MatchResult]) -> Result<(), DedupError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(MATCH_HEADERS).map_err(csv_error)?;
    for result in matches {
        writer.serialize(result).map_err(csv_error)?;
    }
    writer.flush().map_err(DedupError::io)
}

pub fn write_matches_json<W: io::Write>(mut sink: W, matches: &[MatchResult]) -> Result<(), DedupError> {
    serde_json::to_writer_pretty(&mut sink, matches).map_err(DedupError::io)?;
    sink.flush().map_err(DedupError::io)
}
