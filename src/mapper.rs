//! Conversion between grids, records and delimited text.
//!
//! Parsing zips a header row against each data row: short rows are padded
//! with [`Value::Null`] so every record carries the full header set, and long
//! rows are cut to the header width. Writing goes the other way, taking the
//! columns from the options or from the first record and formatting every
//! cell with [`crate::format`].
//!
//! ```rust
//! use serde_dsv::{mapper, DsvOptions, Value};
//!
//! let records = mapper::to_records("ColA,ColB\nData1", &DsvOptions::new());
//! assert_eq!(records[0].get("ColB"), Some(&Value::Null));
//!
//! let text = mapper::to_delimited(&records, &DsvOptions::new());
//! assert_eq!(text, "ColA,ColB\nData1,");
//! ```

use crate::format::write_cell;
use crate::tokenizer::{tokenize, Grid};
use crate::{DsvOptions, Record, RecordSet, Value};

/// Parses delimited text into records.
#[must_use]
pub fn to_records(text: &str, options: &DsvOptions) -> RecordSet {
    if text.is_empty() {
        return RecordSet::new();
    }
    records_from_grid(tokenize(text, options.delimiter), options.has_headers)
}

/// Builds records from a tokenized grid.
///
/// With `has_headers` the first row names the columns; otherwise the columns
/// are `col1..colN`, N being the width of the first row.
#[must_use]
pub fn records_from_grid(grid: Grid, has_headers: bool) -> RecordSet {
    let mut rows = grid.into_iter();
    let headers: Vec<String> = if has_headers {
        match rows.next() {
            Some(header) => header,
            None => return RecordSet::new(),
        }
    } else {
        match rows.as_slice().first() {
            Some(first) => (1..=first.len()).map(|i| format!("col{}", i)).collect(),
            None => return RecordSet::new(),
        }
    };

    let records: RecordSet = rows
        .map(|row| {
            let mut fields = row.into_iter();
            let mut record = Record::with_capacity(headers.len());
            for header in &headers {
                let value = fields.next().map_or(Value::Null, Value::String);
                record.insert(header.clone(), value);
            }
            record
        })
        .collect();

    tracing::debug!(
        records = records.len(),
        columns = headers.len(),
        "mapped grid to records"
    );
    records
}

/// Writes records as delimited text.
///
/// Returns an empty string for an empty record set. The output has a header
/// line and one line per record, joined with `\n` and without a trailing
/// line break.
#[must_use]
pub fn to_delimited(records: &[Record], options: &DsvOptions) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let columns: Vec<&str> = match &options.columns {
        Some(columns) => columns.iter().map(String::as_str).collect(),
        None => first.keys().map(String::as_str).collect(),
    };

    let separator = options.delimiter.as_char();
    let mut output = String::with_capacity(64 * (records.len() + 1));
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            output.push(separator);
        }
        write_cell(&mut output, column, options.delimiter);
    }
    for record in records {
        output.push('\n');
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                output.push(separator);
            }
            // Missing columns and nulls both leave the cell empty.
            if let Some(text) = record.get(column).and_then(Value::to_text) {
                write_cell(&mut output, &text, options.delimiter);
            }
        }
    }

    tracing::debug!(
        records = records.len(),
        columns = columns.len(),
        bytes = output.len(),
        "wrote delimited text"
    );
    output
}
