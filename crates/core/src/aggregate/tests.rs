//! Tests for grouped and pivoted sums.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::dimension::{DimValue, Dimension};
use super::error::AggregateError;
use super::pivot::{ColumnKey, PivotColumn, PivotRowKey};
use super::service::Aggregator;
use crate::calendar::{DerivedRow, derive_ledger};
use crate::ledger::{Ledger, Transaction};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn ledger(rows: &[(NaiveDateTime, &str, Decimal, Decimal)]) -> Ledger {
    Ledger::new(
        rows.iter()
            .enumerate()
            .map(|(position, (date, desc, amount, balance))| Transaction {
                position,
                date: *date,
                desc: (*desc).to_string(),
                amount: *amount,
                balance: *balance,
            })
            .collect(),
    )
}

fn paycheck_and_groceries() -> Vec<DerivedRow> {
    derive_ledger(&ledger(&[
        (at(2020, 1, 1, 8), "Paycheck", dec!(1000), dec!(1000)),
        (at(2020, 1, 2, 9), "Groceries", dec!(-50), dec!(950)),
    ]))
}

#[test]
fn test_group_sum_by_year() {
    let rows = paycheck_and_groceries();
    let result = Aggregator::group_sum(&rows, Dimension::Year);

    assert_eq!(result.len(), 1);
    assert_eq!(result.get(&DimValue::Int(2020)), Some(dec!(950)));
}

#[test]
fn test_group_sum_by_weekday() {
    let rows = paycheck_and_groceries();
    let result = Aggregator::group_sum(&rows, Dimension::WeekdayAbbr);

    let pairs: Vec<(String, Decimal)> = result
        .iter()
        .map(|(value, sum)| (value.to_string(), sum))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("2-Wed".to_string(), dec!(1000)),
            ("3-Thu".to_string(), dec!(-50)),
        ]
    );
}

#[test]
fn test_group_sum_orders_numbers_numerically() {
    let rows = derive_ledger(&ledger(&[
        (at(2020, 1, 1, 10), "a", dec!(1), dec!(1)),
        (at(2020, 1, 1, 9), "b", dec!(2), dec!(3)),
        (at(2020, 1, 1, 23), "c", dec!(3), dec!(6)),
    ]));
    let result = Aggregator::group_sum(&rows, Dimension::Hour);

    let hours: Vec<DimValue> = result.iter().map(|(value, _)| value.clone()).collect();
    assert_eq!(
        hours,
        vec![DimValue::Int(9), DimValue::Int(10), DimValue::Int(23)]
    );
}

#[rstest]
#[case("year", Dimension::Year)]
#[case("yearmonth", Dimension::YearMonth)]
#[case("month", Dimension::Month)]
#[case("weekday_abbr", Dimension::WeekdayAbbr)]
#[case("hour", Dimension::Hour)]
fn test_dimension_from_name(#[case] name: &str, #[case] expected: Dimension) {
    assert_eq!(name.parse::<Dimension>(), Ok(expected));
    assert_eq!(expected.to_string(), name);
}

#[rstest]
#[case("quarter")]
#[case("Year")]
#[case("")]
fn test_invalid_dimension(#[case] name: &str) {
    let rows = paycheck_and_groceries();
    assert_eq!(
        Aggregator::group_sum_by_name(&rows, name).unwrap_err(),
        AggregateError::InvalidDimension(name.to_string())
    );
    assert!(matches!(
        Aggregator::pivot_sum_by_names(&rows, &["year", name]),
        Err(AggregateError::InvalidDimension(_))
    ));
}

#[test]
fn test_empty_input_gives_empty_aggregates() {
    let rows: Vec<DerivedRow> = Vec::new();

    for dimension in Dimension::ALL {
        let group = Aggregator::group_sum(&rows, dimension);
        assert!(group.is_empty());
        assert_eq!(group.total(), Decimal::ZERO);
    }

    let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Year]);
    assert!(pivot.is_empty());
    assert!(pivot.columns().is_empty());
    assert_eq!(pivot.grand_total(), Decimal::ZERO);
    assert_eq!(
        pivot.pivot_columns().collect::<Vec<_>>(),
        vec![PivotColumn::All]
    );

    let described = pivot.describe();
    assert_eq!(described.columns.len(), 1);
    assert_eq!(described.margin().map(|stats| stats.count), Some(0));
    assert_eq!(pivot.sum().columns, vec![(PivotColumn::All, Decimal::ZERO)]);
}

#[test]
fn test_pivot_cells_and_margins() {
    let rows = derive_ledger(&ledger(&[
        (at(2020, 12, 31, 8), "a", dec!(100), dec!(100)),
        (at(2021, 1, 1, 8), "b", dec!(-30), dec!(70)),
        (at(2021, 1, 2, 8), "c", dec!(-20), dec!(50)),
    ]));
    let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Year]);

    let y2020 = ColumnKey(vec![DimValue::Int(2020)]);
    let y2021 = ColumnKey(vec![DimValue::Int(2021)]);
    assert_eq!(pivot.columns(), &[y2020.clone(), y2021.clone()]);

    let first = PivotRowKey {
        date: at(2020, 12, 31, 8),
        position: 0,
    };
    assert_eq!(pivot.cell(&first, &y2020), Some(dec!(100)));
    assert_eq!(pivot.cell(&first, &y2021), None);

    assert_eq!(pivot.column_total(&y2020), Some(dec!(100)));
    assert_eq!(pivot.column_total(&y2021), Some(dec!(-50)));
    assert_eq!(pivot.grand_total(), dec!(50));
    assert_eq!(pivot.rows()[1].total, dec!(-30));
}

#[test]
fn test_pivot_keeps_rows_with_same_timestamp() {
    let when = at(2022, 5, 5, 12);
    let rows = derive_ledger(&ledger(&[
        (when, "a", dec!(1), dec!(1)),
        (when, "b", dec!(2), dec!(3)),
    ]));
    let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Hour]);

    assert_eq!(pivot.rows().len(), 2);
    assert_eq!(pivot.rows()[0].key.position, 0);
    assert_eq!(pivot.rows()[1].key.position, 1);
    assert_eq!(pivot.grand_total(), dec!(3));
}

#[test]
fn test_pivot_rows_ordered_by_date_then_position() {
    let rows = derive_ledger(&ledger(&[
        (at(2022, 5, 6, 12), "later", dec!(1), dec!(1)),
        (at(2022, 5, 5, 12), "earlier", dec!(2), dec!(3)),
    ]));
    let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Hour]);

    let positions: Vec<usize> = pivot.rows().iter().map(|row| row.key.position).collect();
    assert_eq!(positions, vec![1, 0]);
}

#[test]
fn test_pivot_by_year_and_month() {
    let rows = derive_ledger(&ledger(&[
        (at(2020, 2, 1, 8), "a", dec!(5), dec!(5)),
        (at(2020, 11, 1, 8), "b", dec!(6), dec!(11)),
        (at(2021, 2, 1, 8), "c", dec!(7), dec!(18)),
    ]));
    let pivot = Aggregator::pivot_sum_by_names(&rows, &["year", "month"]).unwrap();

    let keys: Vec<String> = pivot.columns().iter().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["2020, 2", "2020, 11", "2021, 2"]);

    let column = PivotColumn::Key(pivot.columns()[1].clone());
    assert_eq!(column.header(0), "2020");
    assert_eq!(column.header(1), "11");
    assert_eq!(PivotColumn::All.header(0), "All");
    assert_eq!(PivotColumn::All.header(1), "");
}

#[test]
fn test_describe_and_sum() {
    let rows = derive_ledger(&ledger(&[
        (at(2020, 1, 1, 8), "a", dec!(1), dec!(1)),
        (at(2020, 1, 2, 8), "b", dec!(2), dec!(3)),
        (at(2020, 1, 3, 8), "c", dec!(3), dec!(6)),
        (at(2021, 1, 3, 8), "d", dec!(4), dec!(10)),
    ]));
    let pivot = Aggregator::pivot_sum(&rows, &[Dimension::Year]);

    let described = pivot.describe();
    assert_eq!(described.columns.len(), 3);
    let (_, y2020) = &described.columns[0];
    assert_eq!(y2020.count, 3);
    assert_eq!(y2020.mean, Some(dec!(2)));
    assert_eq!(y2020.std.map(|std| std.round_dp(6)), Some(dec!(1)));
    let (_, y2021) = &described.columns[1];
    assert_eq!(y2021.count, 1);
    assert_eq!(y2021.std, None);
    let margin = described.margin().unwrap();
    assert_eq!(margin.count, 4);
    assert_eq!(margin.max, Some(dec!(4)));

    let sums = pivot.sum();
    assert_eq!(
        sums.columns,
        vec![
            (
                PivotColumn::Key(ColumnKey(vec![DimValue::Int(2020)])),
                dec!(6)
            ),
            (
                PivotColumn::Key(ColumnKey(vec![DimValue::Int(2021)])),
                dec!(4)
            ),
            (PivotColumn::All, dec!(10)),
        ]
    );
}

fn arb_rows() -> impl Strategy<Value = Vec<DerivedRow>> {
    prop::collection::vec((0i64..2000, 0i64..24, -100_000i64..100_000), 0..60).prop_map(
        |specs| {
            let base = at(2019, 1, 1, 0);
            let txns: Vec<Transaction> = specs
                .into_iter()
                .enumerate()
                .map(|(position, (days, hours, cents))| Transaction {
                    position,
                    date: base + Duration::days(days) + Duration::hours(hours),
                    desc: format!("row {position}"),
                    amount: Decimal::new(cents, 2),
                    balance: Decimal::ZERO,
                })
                .collect();
            derive_ledger(&Ledger::new(txns))
        },
    )
}

proptest! {
    #[test]
    fn prop_group_totals_equal_amount_sum(rows in arb_rows()) {
        let expected: Decimal = rows.iter().map(|row| row.transaction.amount).sum();
        for dimension in Dimension::ALL {
            prop_assert_eq!(Aggregator::group_sum(&rows, dimension).total(), expected);
        }
    }

    #[test]
    fn prop_pivot_corner_equals_amount_sum(rows in arb_rows()) {
        let expected: Decimal = rows.iter().map(|row| row.transaction.amount).sum();
        for columns in [
            vec![Dimension::Year],
            vec![Dimension::Year, Dimension::Month],
            vec![Dimension::WeekdayAbbr],
            vec![Dimension::Hour],
        ] {
            let pivot = Aggregator::pivot_sum(&rows, &columns);
            prop_assert_eq!(pivot.grand_total(), expected);
            prop_assert_eq!(pivot.rows().len(), rows.len());
            let row_total_sum: Decimal = pivot.rows().iter().map(|row| row.total).sum();
            prop_assert_eq!(row_total_sum, expected);
        }
    }
}
