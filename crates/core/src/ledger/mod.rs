//! Transaction ledger input.
//!
//! This module implements the ledger side of the pipeline:
//! - Transaction rows and the ordered ledger table
//! - The tab-separated ledger reader
//! - Error types for parse and I/O failures

pub mod error;
pub mod reader;
pub mod transaction;

#[cfg(test)]
mod reader_props;

pub use error::LedgerError;
pub use reader::{parse_timestamp, read_ledger, read_ledger_from};
pub use transaction::{Ledger, Transaction};
