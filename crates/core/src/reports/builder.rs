//! Assembly of the standard ledger report.

use pfi_shared::RenderConfig;
use tracing::debug;

use super::error::ReportError;
use super::table::Table;
use super::tree::{HeadingStyle, ReportTree};
use crate::aggregate::{Aggregator, Dimension};
use crate::calendar::{DerivedRow, derive_ledger};
use crate::ledger::Ledger;

/// Key of the raw ledger table.
pub const LEDGER_KEY: &str = "df";
/// Key of the nested group-by section.
pub const GROUPBY_KEY: &str = "build_groupby_reports";
/// Key of the nested pivot section.
pub const PIVOT_KEY: &str = "build_pivot_reports";
/// Key of the derived table inside the pivot section.
pub const DERIVED_KEY: &str = "df-";

/// Group-by reports: key suffix and dimension.
const GROUPBY_REPORTS: [(&str, Dimension); 5] = [
    ("year", Dimension::Year),
    ("yearmonth", Dimension::YearMonth),
    ("month", Dimension::Month),
    ("weekday", Dimension::WeekdayAbbr),
    ("hour", Dimension::Hour),
];

/// Pivot reports: key suffix and column dimensions.
const PIVOT_REPORTS: [(&str, &[Dimension]); 4] = [
    ("year", &[Dimension::Year]),
    ("yearmonth", &[Dimension::Year, Dimension::Month]),
    ("weekday", &[Dimension::WeekdayAbbr]),
    ("hour", &[Dimension::Hour]),
];

/// Builds report trees from a ledger.
pub struct ReportBuilder;

impl ReportBuilder {
    /// Builds the standard report: the ledger table, the group-by section
    /// and the pivot section, in that order.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DuplicateKey` if two sections share a key.
    pub fn build(ledger: &Ledger, config: &RenderConfig) -> Result<ReportTree, ReportError> {
        let rows = derive_ledger(ledger);

        let mut root = ReportTree::new(HeadingStyle::root(config));
        root.add(LEDGER_KEY, Table::from(ledger))?;
        root.add(GROUPBY_KEY, Self::groupby_reports(&rows, config)?)?;
        root.add(PIVOT_KEY, Self::pivot_reports(&rows, config)?)?;

        debug!(rows = ledger.len(), sections = root.len(), "Built report tree");
        Ok(root)
    }

    /// One `groupby_<dimension>` table per supported dimension.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DuplicateKey` if two sections share a key.
    pub fn groupby_reports(
        rows: &[DerivedRow],
        config: &RenderConfig,
    ) -> Result<ReportTree, ReportError> {
        let mut tree = ReportTree::new(HeadingStyle::section(config));
        for (suffix, dimension) in GROUPBY_REPORTS {
            let group = Aggregator::group_sum(rows, dimension);
            tree.add(format!("groupby_{suffix}"), Table::from(&group))?;
        }
        Ok(tree)
    }

    /// Per pivot: the pivot table, its `.describe()` and `.sum()` views;
    /// then the derived table.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DuplicateKey` if two sections share a key.
    pub fn pivot_reports(
        rows: &[DerivedRow],
        config: &RenderConfig,
    ) -> Result<ReportTree, ReportError> {
        let mut tree = ReportTree::new(HeadingStyle::section(config));
        for (suffix, dimensions) in PIVOT_REPORTS {
            let pivot = Aggregator::pivot_sum(rows, dimensions);
            let key = format!("pivot_by_{suffix}");
            tree.add(key.clone(), Table::from(&pivot))?;
            tree.add(format!("{key}.describe()"), Table::from(&pivot.describe()))?;
            tree.add(format!("{key}.sum()"), Table::from(&pivot.sum()))?;
        }
        tree.add(DERIVED_KEY, Table::from(rows))?;
        Ok(tree)
    }
}
