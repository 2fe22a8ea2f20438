//! Conversions from ledger and aggregate types into renderable tables.

use rust_decimal::Decimal;

use super::table::{Cell, Table};
use crate::aggregate::{
    ColumnStats, ColumnTotals, Dimension, GroupSum, MARGIN_LABEL, PivotColumn, PivotDescription,
    PivotTable,
};
use crate::calendar::DerivedRow;
use crate::ledger::{Ledger, Transaction};

/// Timestamp format used in rendered tables.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LEDGER_COLUMNS: [&str; 4] = ["date", "desc", "amount", "balance"];
const DERIVED_COLUMNS: [&str; 7] = [
    "year",
    "yearmonth",
    "month",
    "weekday",
    "weekday_abbr",
    "hour",
    "index",
];

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn ledger_cells(txn: &Transaction) -> Vec<Cell> {
    vec![
        Cell::Text(txn.date.format(DATE_FORMAT).to_string()),
        Cell::Text(txn.desc.clone()),
        Cell::Amount(txn.amount),
        Cell::Amount(txn.balance),
    ]
}

/// Empty table whose header has one level per pivot dimension.
fn pivot_shaped(
    index_names: Vec<String>,
    dimensions: &[Dimension],
    columns: impl Iterator<Item = PivotColumn>,
) -> Table {
    let depth = dimensions.len().max(1);
    Table::with_levels(
        index_names,
        dimensions.iter().map(|dim| dim.name().to_string()).collect(),
        columns
            .map(|column| (0..depth).map(|level| column.header(level)).collect())
            .collect(),
    )
}

impl From<&Ledger> for Table {
    fn from(ledger: &Ledger) -> Self {
        let mut table = Self::new(vec![String::new()], labels(&LEDGER_COLUMNS));
        for txn in ledger {
            table.push_row(vec![txn.position.to_string()], ledger_cells(txn));
        }
        table
    }
}

impl From<&[DerivedRow]> for Table {
    fn from(rows: &[DerivedRow]) -> Self {
        let columns: Vec<String> = LEDGER_COLUMNS
            .iter()
            .chain(DERIVED_COLUMNS.iter())
            .map(|name| (*name).to_string())
            .collect();
        let mut table = Self::new(vec![String::new()], columns);
        for row in rows {
            let txn = &row.transaction;
            let cal = &row.calendar;
            let mut cells = ledger_cells(txn);
            cells.extend([
                Cell::Amount(Decimal::from(cal.year)),
                Cell::Text(cal.yearmonth.clone()),
                Cell::Amount(Decimal::from(cal.month)),
                Cell::Amount(Decimal::from(cal.weekday)),
                Cell::Text(cal.weekday_abbr.clone()),
                Cell::Amount(Decimal::from(cal.hour)),
                Cell::Amount(Decimal::from(txn.position)),
            ]);
            table.push_row(vec![txn.position.to_string()], cells);
        }
        table
    }
}

impl From<&GroupSum> for Table {
    fn from(group: &GroupSum) -> Self {
        let mut table = Self::new(
            vec![group.dimension().name().to_string()],
            vec!["amount".to_string()],
        );
        for (value, sum) in group.iter() {
            table.push_row(vec![value.to_string()], vec![Cell::Amount(sum)]);
        }
        table
    }
}

impl From<&PivotTable> for Table {
    fn from(pivot: &PivotTable) -> Self {
        let mut table = pivot_shaped(
            vec!["date".to_string(), "index".to_string()],
            pivot.dimensions(),
            pivot.pivot_columns(),
        );
        for row in pivot.rows() {
            let mut cells: Vec<Cell> = row.cells.iter().copied().map(Cell::from).collect();
            cells.push(Cell::Amount(row.total));
            table.push_row(
                vec![
                    row.key.date.format(DATE_FORMAT).to_string(),
                    row.key.position.to_string(),
                ],
                cells,
            );
        }

        let mut margin: Vec<Cell> = pivot
            .column_totals()
            .iter()
            .copied()
            .map(Cell::Amount)
            .collect();
        margin.push(Cell::Amount(pivot.grand_total()));
        table.push_row(vec![MARGIN_LABEL.to_string(), String::new()], margin);
        table
    }
}

impl From<&PivotDescription> for Table {
    fn from(description: &PivotDescription) -> Self {
        let mut table = pivot_shaped(
            vec![String::new()],
            &description.dimensions,
            description.columns.iter().map(|(column, _)| column.clone()),
        );
        let values: Vec<[Option<Decimal>; 8]> = description
            .columns
            .iter()
            .map(|(_, stats)| stats.values())
            .collect();
        for (i, label) in ColumnStats::LABELS.iter().enumerate() {
            let cells = values
                .iter()
                .map(|column| column[i].map_or(Cell::Empty, Cell::Statistic))
                .collect();
            table.push_row(vec![(*label).to_string()], cells);
        }
        table
    }
}

impl From<&ColumnTotals> for Table {
    fn from(totals: &ColumnTotals) -> Self {
        let depth = totals.dimensions.len().max(1);
        let index_names = totals
            .dimensions
            .iter()
            .map(|dim| dim.name().to_string())
            .collect();
        let mut table = Self::new(index_names, vec!["sum".to_string()]);
        for (column, total) in &totals.columns {
            let index = (0..depth).map(|level| column.header(level)).collect();
            table.push_row(index, vec![Cell::Amount(*total)]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::calendar::derive_ledger;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> Ledger {
        let day = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2020, 1, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        Ledger::new(vec![
            Transaction {
                position: 0,
                date: day(1, 8),
                desc: "Paycheck".to_string(),
                amount: dec!(1000),
                balance: dec!(1000),
            },
            Transaction {
                position: 1,
                date: day(2, 9),
                desc: "Groceries".to_string(),
                amount: dec!(-50),
                balance: dec!(950),
            },
        ])
    }

    #[test]
    fn test_ledger_table() {
        let table = Table::from(&sample());
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.rows()[1].index, vec!["1".to_string()]);
        assert_eq!(
            table.rows()[0].cells[0],
            Cell::Text("2020-01-01 08:00:00".to_string())
        );
        assert_eq!(table.rows()[1].cells[2], Cell::Amount(dec!(-50)));
    }

    #[test]
    fn test_derived_table_has_calendar_columns() {
        let rows = derive_ledger(&sample());
        let table = Table::from(rows.as_slice());
        assert_eq!(table.columns().len(), 11);
        assert_eq!(table.rows()[0].cells[8], Cell::Text("2-Wed".to_string()));
    }

    #[test]
    fn test_pivot_table_has_margin_row_and_column() {
        let rows = derive_ledger(&sample());
        let pivot = Aggregator::pivot_sum(&rows, &[Dimension::WeekdayAbbr]);
        let table = Table::from(&pivot);

        // Two weekday columns plus "All".
        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.columns()[2], vec!["All".to_string()]);
        // Two transactions plus the margin row.
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[0].cells[1], Cell::Empty);
        let margin = &table.rows()[2];
        assert_eq!(margin.index[0], "All");
        assert_eq!(margin.cells[2], Cell::Amount(dec!(950)));
    }

    #[test]
    fn test_describe_table_rows() {
        let rows = derive_ledger(&sample());
        let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Year]);
        let table = Table::from(&pivot.describe());

        let labels: Vec<&str> = table.rows().iter().map(|r| r.index[0].as_str()).collect();
        assert_eq!(labels, ColumnStats::LABELS.to_vec());
        // count of the 2020 column
        assert_eq!(table.rows()[0].cells[0], Cell::Statistic(dec!(2)));
        // mean of the "All" column
        assert_eq!(table.rows()[1].cells[1], Cell::Statistic(dec!(475)));
    }

    #[test]
    fn test_sum_table_lists_columns_as_rows() {
        let rows = derive_ledger(&sample());
        let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Year, Dimension::Month]);
        let table = Table::from(&pivot.sum());

        assert_eq!(table.index_names(), &["year".to_string(), "month".to_string()]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(
            table.rows()[0].index,
            vec!["2020".to_string(), "1".to_string()]
        );
        assert_eq!(table.rows()[1].index, vec!["All".to_string(), String::new()]);
        assert_eq!(table.rows()[1].cells, vec![Cell::Amount(dec!(950))]);
    }

    #[test]
    fn test_group_sum_table() {
        let rows = derive_ledger(&sample());
        let group = Aggregator::group_sum(&rows, Dimension::Year);
        let table = Table::from(&group);
        assert_eq!(table.index_names(), &["year".to_string()]);
        assert_eq!(table.rows()[0].cells, vec![Cell::Amount(dec!(950))]);
    }
}
