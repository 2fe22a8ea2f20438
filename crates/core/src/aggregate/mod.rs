//! Grouped and pivoted sums over derived ledger rows.
//!
//! This module provides:
//! - Calendar dimensions and their values
//! - Group sums over one dimension
//! - Pivot tables with "All" margins, plus their `describe()` and `sum()` views
//! - Column statistics

pub mod dimension;
pub mod error;
pub mod group;
pub mod pivot;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use dimension::{DimValue, Dimension};
pub use error::AggregateError;
pub use group::GroupSum;
pub use pivot::{
    ColumnKey, ColumnTotals, MARGIN_LABEL, PivotColumn, PivotDescription, PivotRow, PivotRowKey,
    PivotTable,
};
pub use service::Aggregator;
pub use stats::ColumnStats;
