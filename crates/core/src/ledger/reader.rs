//! Tab-separated ledger reader.
//!
//! Input rows have exactly four columns and no header:
//! `date \t desc \t amount \t balance`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use pfi_shared::types::parse_amount;
use tracing::debug;

use super::error::LedgerError;
use super::transaction::{Ledger, Transaction};

/// Number of columns in a ledger row.
pub const LEDGER_COLUMNS: usize = 4;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Parses a ledger timestamp.
///
/// Timestamps carrying a UTC offset keep their local wall-clock time. A bare
/// date means midnight.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Reads a ledger file.
pub fn read_ledger(path: impl AsRef<Path>) -> Result<Ledger, LedgerError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_ledger_from(file, &path.display().to_string())
}

/// Reads a ledger from any reader; `source_name` is only used in errors.
pub fn read_ledger_from<R: Read>(reader: R, source_name: &str) -> Result<Ledger, LedgerError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();

    for (record_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LedgerError::Parse {
            source_name: source_name.to_string(),
            line: e.position().map_or(record_idx as u64 + 1, csv::Position::line),
            field: "row",
            message: e.to_string(),
        })?;
        let line = record
            .position()
            .map_or(record_idx as u64 + 1, csv::Position::line);

        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        let parse_err = |field: &'static str, message: String| LedgerError::Parse {
            source_name: source_name.to_string(),
            line,
            field,
            message,
        };

        if record.len() != LEDGER_COLUMNS {
            return Err(parse_err(
                "row",
                format!("expected {LEDGER_COLUMNS} fields, found {}", record.len()),
            ));
        }

        let date = parse_timestamp(&record[0])
            .ok_or_else(|| parse_err("date", format!("unrecognized timestamp `{}`", &record[0])))?;
        let amount = parse_amount(&record[2]).map_err(|e| parse_err("amount", e.to_string()))?;
        let balance = parse_amount(&record[3]).map_err(|e| parse_err("balance", e.to_string()))?;

        rows.push(Transaction {
            position: rows.len(),
            date,
            desc: record[1].to_string(),
            amount,
            balance,
        });
    }

    debug!(source = source_name, rows = rows.len(), "Parsed ledger");

    Ok(Ledger::new(rows))
}
