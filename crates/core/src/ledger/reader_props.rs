//! Property-based tests for the ledger reader.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::reader::read_ledger_from;

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (1990i32..2040, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, m, d, h, min, s)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap()
        },
    )
}

fn row() -> impl Strategy<Value = (NaiveDateTime, String, i64, i64)> {
    (
        timestamp(),
        "[A-Za-z0-9 .&<>\"']{0,24}",
        -10_000_000i64..10_000_000,
        -10_000_000i64..10_000_000,
    )
}

/// Formats cents with thousands separators, e.g. `-1,234.56`.
fn with_separators(cents: i64) -> String {
    let value = Decimal::new(cents, 2).abs().to_string();
    let (int_part, frac_part) = value.split_once('.').unwrap_or((value.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if cents < 0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

proptest! {
    /// Every source line becomes exactly one row whose fields decode to the
    /// literal source values.
    #[test]
    fn test_reader_round_trips_rows(rows in prop::collection::vec(row(), 0..40)) {
        let text: String = rows
            .iter()
            .map(|(date, desc, amount, balance)| {
                format!(
                    "{}\t{}\t{}\t{}\n",
                    date.format("%Y-%m-%d %H:%M:%S"),
                    desc,
                    Decimal::new(*amount, 2),
                    with_separators(*balance),
                )
            })
            .collect();

        let ledger = read_ledger_from(text.as_bytes(), "prop.tsv").unwrap();

        prop_assert_eq!(ledger.len(), rows.len());
        for (parsed, (date, desc, amount, balance)) in ledger.iter().zip(&rows) {
            prop_assert_eq!(parsed.date, *date);
            prop_assert_eq!(&parsed.desc, desc);
            prop_assert_eq!(parsed.amount, Decimal::new(*amount, 2));
            prop_assert_eq!(parsed.balance, Decimal::new(*balance, 2));
        }
    }

    /// Positions are assigned in source order.
    #[test]
    fn test_reader_assigns_positions(rows in prop::collection::vec(row(), 1..20)) {
        let text: String = rows
            .iter()
            .map(|(date, desc, amount, balance)| {
                format!("{}\t{desc}\t{amount}\t{balance}\n", date.format("%Y-%m-%d %H:%M"))
            })
            .collect();

        let ledger = read_ledger_from(text.as_bytes(), "prop.tsv").unwrap();
        for (idx, parsed) in ledger.iter().enumerate() {
            prop_assert_eq!(parsed.position, idx);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::with_separators;

    #[test]
    fn test_with_separators() {
        assert_eq!(with_separators(123_456), "1,234.56");
        assert_eq!(with_separators(-100_000_000), "-1,000,000.00");
        assert_eq!(with_separators(5), "0.05");
        assert_eq!(with_separators(0), "0.00");
    }
}
