//! Transaction rows and the in-memory ledger table.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a transaction ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Zero-based position of the row in its source.
    pub position: usize,
    /// When the transaction happened.
    pub date: NaiveDateTime,
    /// Free-text description.
    pub desc: String,
    /// Signed amount (negative for debits).
    pub amount: Decimal,
    /// Running balance after this transaction.
    pub balance: Decimal,
}

/// An ordered transaction ledger.
///
/// Rows keep the order of the source file; nothing is re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<Transaction>,
}

impl Ledger {
    /// Creates a ledger from rows already in source order.
    #[must_use]
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    /// Returns the rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the ledger has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every row's amount.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.rows.iter().map(|row| row.amount).sum()
    }

    /// Iterates over rows in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(position: usize, amount: Decimal) -> Transaction {
        Transaction {
            position,
            date: NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            desc: format!("row {position}"),
            amount,
            balance: amount,
        }
    }

    #[test]
    fn test_total_amount() {
        let ledger = Ledger::new(vec![txn(0, dec!(1000)), txn(1, dec!(-50.25))]);
        assert_eq!(ledger.total_amount(), dec!(949.75));
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_amount(), Decimal::ZERO);
        assert_eq!(ledger.iter().count(), 0);
    }
}
