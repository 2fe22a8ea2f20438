//! Aggregation entry points.

use tracing::debug;

use super::dimension::Dimension;
use super::error::AggregateError;
use super::group::GroupSum;
use super::pivot::PivotTable;
use crate::calendar::DerivedRow;

/// Service for computing grouped and pivoted sums over derived rows.
pub struct Aggregator;

impl Aggregator {
    /// Sums `amount` per value of `dimension`.
    #[must_use]
    pub fn group_sum(rows: &[DerivedRow], dimension: Dimension) -> GroupSum {
        let result = GroupSum::compute(rows, dimension);
        debug!(dimension = %dimension, groups = result.len(), "Computed group sum");
        result
    }

    /// Like [`Aggregator::group_sum`], resolving the dimension by name.
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::InvalidDimension` for an unsupported name.
    pub fn group_sum_by_name(rows: &[DerivedRow], name: &str) -> Result<GroupSum, AggregateError> {
        let dimension = name.parse::<Dimension>()?;
        Ok(Self::group_sum(rows, dimension))
    }

    /// Pivots amounts into one column per distinct value of `columns`,
    /// with one row per transaction and "All" margins.
    #[must_use]
    pub fn pivot_sum(rows: &[DerivedRow], columns: &[Dimension]) -> PivotTable {
        let result = PivotTable::compute(rows, columns);
        debug!(
            columns = result.columns().len(),
            rows = result.rows().len(),
            "Computed pivot sum"
        );
        result
    }

    /// Like [`Aggregator::pivot_sum`], resolving the column dimensions by name.
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::InvalidDimension` for the first unsupported name.
    pub fn pivot_sum_by_names(
        rows: &[DerivedRow],
        names: &[&str],
    ) -> Result<PivotTable, AggregateError> {
        let columns = names
            .iter()
            .map(|name| name.parse::<Dimension>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::pivot_sum(rows, &columns))
    }
}
