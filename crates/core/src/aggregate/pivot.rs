//! Pivoted cross-tabulation of amounts with "All" margins.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use super::dimension::{DimValue, Dimension};
use super::stats::ColumnStats;
use crate::calendar::DerivedRow;

/// Label of the margin row and column.
pub const MARGIN_LABEL: &str = "All";

/// Index of one pivot row: the transaction's timestamp and source position.
///
/// The position keeps transactions that share a timestamp apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PivotRowKey {
    /// Transaction timestamp.
    pub date: NaiveDateTime,
    /// Zero-based source position.
    pub position: usize,
}

impl PivotRowKey {
    /// Row key of a derived row.
    #[must_use]
    pub fn of(row: &DerivedRow) -> Self {
        Self {
            date: row.transaction.date,
            position: row.transaction.position,
        }
    }
}

/// Column key: one value per pivot dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ColumnKey(pub Vec<DimValue>);

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// A pivot column: a dimension key or the "All" margin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PivotColumn {
    /// Column for one combination of dimension values.
    Key(ColumnKey),
    /// Row-total margin column.
    All,
}

impl PivotColumn {
    /// Header text for level `level` of the column header.
    ///
    /// The margin column is labelled on the first level only.
    #[must_use]
    pub fn header(&self, level: usize) -> String {
        match self {
            Self::Key(key) => key.0.get(level).map(ToString::to_string).unwrap_or_default(),
            Self::All if level == 0 => MARGIN_LABEL.to_string(),
            Self::All => String::new(),
        }
    }
}

/// One body row of a pivot table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    /// Row index.
    pub key: PivotRowKey,
    /// One cell per column; `None` where no transaction matched.
    pub cells: Vec<Option<Decimal>>,
    /// Row total ("All" column).
    pub total: Decimal,
}

/// Cross-tabulation of amounts: rows by transaction, columns by dimension
/// values, with an "All" margin row and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    dimensions: Vec<Dimension>,
    columns: Vec<ColumnKey>,
    rows: Vec<PivotRow>,
    column_totals: Vec<Decimal>,
    grand_total: Decimal,
}

impl PivotTable {
    /// Pivots `rows` on the given column dimensions.
    ///
    /// Body rows are ordered by `(date, position)` and columns by their
    /// natural key order.
    #[must_use]
    pub fn compute(rows: &[DerivedRow], dimensions: &[Dimension]) -> Self {
        let column_of = |row: &DerivedRow| {
            ColumnKey(
                dimensions
                    .iter()
                    .map(|dim| dim.value_of(&row.calendar))
                    .collect(),
            )
        };

        let columns: Vec<ColumnKey> = rows
            .iter()
            .map(column_of)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column_index: BTreeMap<&ColumnKey, usize> =
            columns.iter().enumerate().map(|(i, key)| (key, i)).collect();

        let mut body: BTreeMap<PivotRowKey, Vec<Option<Decimal>>> = BTreeMap::new();
        for row in rows {
            let key = column_of(row);
            let Some(&col) = column_index.get(&key) else {
                continue;
            };
            let cells = body
                .entry(PivotRowKey::of(row))
                .or_insert_with(|| vec![None; columns.len()]);
            let cell = &mut cells[col];
            *cell = Some(cell.unwrap_or(Decimal::ZERO) + row.transaction.amount);
        }

        let mut column_totals = vec![Decimal::ZERO; columns.len()];
        let rows: Vec<PivotRow> = body
            .into_iter()
            .map(|(key, cells)| {
                let mut total = Decimal::ZERO;
                for (col, cell) in cells.iter().enumerate() {
                    if let Some(value) = cell {
                        total += *value;
                        column_totals[col] += *value;
                    }
                }
                PivotRow { key, cells, total }
            })
            .collect();
        let grand_total = column_totals.iter().copied().sum();

        Self {
            dimensions: dimensions.to_vec(),
            columns,
            rows,
            column_totals,
            grand_total,
        }
    }

    /// Column dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Dimension columns, without the margin.
    #[must_use]
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// Dimension columns followed by the "All" margin column.
    pub fn pivot_columns(&self) -> impl Iterator<Item = PivotColumn> {
        self.columns
            .iter()
            .cloned()
            .map(PivotColumn::Key)
            .chain(std::iter::once(PivotColumn::All))
    }

    /// Body rows, without the margin.
    #[must_use]
    pub fn rows(&self) -> &[PivotRow] {
        &self.rows
    }

    /// Returns true when the table has no body rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Margin row totals, one per dimension column.
    #[must_use]
    pub fn column_totals(&self) -> &[Decimal] {
        &self.column_totals
    }

    /// "All" row value for one column.
    #[must_use]
    pub fn column_total(&self, column: &ColumnKey) -> Option<Decimal> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.column_totals.get(idx).copied()
    }

    /// The "All"/"All" corner cell.
    #[must_use]
    pub const fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Cell at `(row, column)`; `None` when empty or out of range.
    #[must_use]
    pub fn cell(&self, row: &PivotRowKey, column: &ColumnKey) -> Option<Decimal> {
        let col = self.columns.iter().position(|c| c == column)?;
        let row = self.rows.binary_search_by(|r| r.key.cmp(row)).ok()?;
        self.rows[row].cells[col]
    }

    /// Descriptive statistics of each column's body cells.
    #[must_use]
    pub fn describe(&self) -> PivotDescription {
        let mut columns: Vec<(PivotColumn, ColumnStats)> = self
            .columns
            .iter()
            .enumerate()
            .map(|(col, key)| {
                let values: Vec<Decimal> =
                    self.rows.iter().filter_map(|row| row.cells[col]).collect();
                (PivotColumn::Key(key.clone()), ColumnStats::from_values(&values))
            })
            .collect();

        let totals: Vec<Decimal> = self.rows.iter().map(|row| row.total).collect();
        columns.push((PivotColumn::All, ColumnStats::from_values(&totals)));

        PivotDescription {
            dimensions: self.dimensions.clone(),
            columns,
        }
    }

    /// Total of each column's body cells, the "All" column included.
    #[must_use]
    pub fn sum(&self) -> ColumnTotals {
        let mut columns: Vec<(PivotColumn, Decimal)> = self
            .columns
            .iter()
            .cloned()
            .map(PivotColumn::Key)
            .zip(self.column_totals.iter().copied())
            .collect();
        columns.push((PivotColumn::All, self.grand_total));

        ColumnTotals {
            dimensions: self.dimensions.clone(),
            columns,
        }
    }
}

/// Output of [`PivotTable::describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotDescription {
    /// Column dimensions of the source pivot.
    pub dimensions: Vec<Dimension>,
    /// Statistics per column, margin last.
    pub columns: Vec<(PivotColumn, ColumnStats)>,
}

impl PivotDescription {
    /// Statistics of the "All" column.
    #[must_use]
    pub fn margin(&self) -> Option<&ColumnStats> {
        self.columns
            .iter()
            .find(|(column, _)| *column == PivotColumn::All)
            .map(|(_, stats)| stats)
    }
}

/// Output of [`PivotTable::sum`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnTotals {
    /// Column dimensions of the source pivot.
    pub dimensions: Vec<Dimension>,
    /// Total per column, margin last.
    pub columns: Vec<(PivotColumn, Decimal)>,
}
