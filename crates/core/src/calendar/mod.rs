//! Calendar dimensions derived from transaction timestamps.

pub mod derive;


pub use derive::{CalendarFields, DAY_ABBRS, DerivedRow, derive_ledger, weekday_label};
