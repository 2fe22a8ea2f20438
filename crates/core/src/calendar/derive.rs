//! Derivation of year, month, weekday and hour fields.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::ledger::{Ledger, Transaction};

/// Three-letter weekday names, Monday first.
pub const DAY_ABBRS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Returns the sortable weekday label, `0-Mon` through `6-Sun`.
#[must_use]
pub fn weekday_label(weekday: u32) -> String {
    let abbr = DAY_ABBRS.get(weekday as usize).copied().unwrap_or("???");
    format!("{weekday}-{abbr}")
}

/// Calendar fields computed from a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    /// Calendar year.
    pub year: i32,
    /// `YYYY-MM`.
    pub yearmonth: String,
    /// Month, 1-12.
    pub month: u32,
    /// Weekday, 0 = Monday .. 6 = Sunday.
    pub weekday: u32,
    /// `{weekday}-{abbr}`, e.g. `2-Wed`.
    pub weekday_abbr: String,
    /// Hour of day, 0-23.
    pub hour: u32,
}

impl CalendarFields {
    /// Computes every field from `date`.
    #[must_use]
    pub fn from_datetime(date: &NaiveDateTime) -> Self {
        let weekday = date.weekday().num_days_from_monday();
        Self {
            year: date.year(),
            yearmonth: format!("{}-{:02}", date.year(), date.month()),
            month: date.month(),
            weekday,
            weekday_abbr: weekday_label(weekday),
            hour: date.hour(),
        }
    }
}

/// A transaction row together with its calendar fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// The source transaction.
    pub transaction: Transaction,
    /// Fields derived from `transaction.date`.
    pub calendar: CalendarFields,
}

impl DerivedRow {
    /// Derives the calendar fields for one transaction.
    #[must_use]
    pub fn new(transaction: Transaction) -> Self {
        let calendar = CalendarFields::from_datetime(&transaction.date);
        Self {
            transaction,
            calendar,
        }
    }

    /// Recomputes the calendar fields from the current date.
    ///
    /// Leaves the fields unchanged when the date has not been modified.
    pub fn rederive(&mut self) {
        self.calendar = CalendarFields::from_datetime(&self.transaction.date);
    }
}

/// Derives calendar fields for every row of a ledger, keeping source order.
#[must_use]
pub fn derive_ledger(ledger: &Ledger) -> Vec<DerivedRow> {
    ledger.iter().cloned().map(DerivedRow::new).collect()
}
