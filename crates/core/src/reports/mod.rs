//! Report assembly, rendering and output.
//!
//! This module provides:
//! - Labelled tables with aligned text and HTML rendering
//! - The nested report tree with lazy text/HTML rendering
//! - Conversions from ledgers and aggregates into tables
//! - The standard report builder
//! - The atomic HTML and plain-text report writer

pub mod builder;
pub mod error;
pub mod html;
pub mod table;
pub mod tabular;
pub mod tree;
pub mod writer;


pub use builder::{DERIVED_KEY, GROUPBY_KEY, LEDGER_KEY, PIVOT_KEY, ReportBuilder};
pub use error::ReportError;
pub use html::escape_html;
pub use table::{Cell, TABLE_CLASSES, Table, TableRow};
pub use tabular::DATE_FORMAT;
pub use tree::{HeadingStyle, Lines, ReportTree, ReportValue};
pub use writer::{HTML_HEADER, ReportWriter};
