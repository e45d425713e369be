//! CSV ingestion implementation.
//!
//! There is no user-provided schema: the first record is the header and every cell's type is
//! inferred independently with [`Value::infer`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::IngestionResult;
use crate::types::{DataSet, Schema, Value};

/// Reader configuration used by every CSV entry point.
///
/// Headers are handled here rather than by the `csv` crate, and records may have any number of
/// fields so that ragged rows can be padded or truncated instead of rejected.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::None);
    builder
}

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Fails with [`crate::IngestionError::Io`] if the file cannot be opened.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let file = File::open(path.as_ref())?;
    let mut rdr = reader_builder().from_reader(file);
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV text already held in memory.
pub fn ingest_csv_from_str(text: &str) -> IngestionResult<DataSet> {
    let mut rdr = reader_builder().from_reader(text.as_bytes());
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
///
/// Rules:
///
/// - Blank or whitespace-only lines are skipped everywhere, including before the header.
/// - The first remaining record is the header; each token is trimmed and becomes a column name.
/// - Each cell is decoded as UTF-8, with invalid bytes replaced by `U+FFFD`, then trimmed; empty
///   cells are [`Value::Null`], numbers are [`Value::Number`], everything else is
///   [`Value::Utf8`].
/// - Rows shorter than the header are padded with [`Value::Null`]; extra trailing cells are
///   dropped.
/// - When a header name repeats, the right-most column with that name supplies the value.
///
/// An empty or header-only input yields an empty dataset, not an error. With a reader built by
/// [`reader_builder`], only I/O failures from the underlying source are returned as errors.
pub fn ingest_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let mut records = rdr.byte_records();

    let header = loop {
        match records.next() {
            Some(result) => {
                let record = result?;
                if !is_blank(&record) {
                    break record;
                }
            }
            None => return Ok(DataSet::default()),
        }
    };
    let (schema, slot_of) = header_layout(&header);
    let header_len = slot_of.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    let mut truncated = 0usize;
    for result in records {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        if record.len() > header_len {
            truncated += 1;
        }

        let mut row = vec![Value::Null; schema.len()];
        for (pos, &slot) in slot_of.iter().enumerate() {
            row[slot] = match record.get(pos) {
                Some(field) => Value::infer(&String::from_utf8_lossy(field)),
                None => Value::Null,
            };
        }
        rows.push(row);
    }

    if truncated > 0 {
        warn!(
            rows = truncated,
            columns = header_len,
            "dropped cells beyond the header width"
        );
    }
    debug!(rows = rows.len(), columns = schema.len(), "ingested csv");

    Ok(DataSet::new(schema, rows))
}

/// Build the schema from header tokens, plus a map from CSV position to schema slot.
fn header_layout(header: &csv::ByteRecord) -> (Schema, Vec<usize>) {
    let mut columns: Vec<String> = Vec::with_capacity(header.len());
    let mut slot_of = Vec::with_capacity(header.len());
    for token in header.iter() {
        let token = String::from_utf8_lossy(token);
        let name = token.trim();
        let slot = match columns.iter().position(|c| c == name) {
            Some(existing) => existing,
            None => {
                columns.push(name.to_owned());
                columns.len() - 1
            }
        };
        slot_of.push(slot);
    }
    (Schema::new(columns), slot_of)
}

fn is_blank(record: &csv::ByteRecord) -> bool {
    record.len() <= 1
        && record
            .get(0)
            .is_none_or(|f| String::from_utf8_lossy(f).trim().is_empty())
}
