//! Aggregation dimensions and their values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AggregateError;
use crate::calendar::CalendarFields;

/// A derived calendar field that rows can be grouped or pivoted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Calendar year.
    Year,
    /// `YYYY-MM`.
    #[serde(rename = "yearmonth")]
    YearMonth,
    /// Month number.
    Month,
    /// `0-Mon` .. `6-Sun`.
    WeekdayAbbr,
    /// Hour of day.
    Hour,
}

impl Dimension {
    /// Every supported dimension.
    pub const ALL: [Self; 5] = [
        Self::Year,
        Self::YearMonth,
        Self::Month,
        Self::WeekdayAbbr,
        Self::Hour,
    ];

    /// Column name of the dimension.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::YearMonth => "yearmonth",
            Self::Month => "month",
            Self::WeekdayAbbr => "weekday_abbr",
            Self::Hour => "hour",
        }
    }

    /// Reads this dimension's value out of derived calendar fields.
    #[must_use]
    pub fn value_of(self, fields: &CalendarFields) -> DimValue {
        match self {
            Self::Year => DimValue::Int(i64::from(fields.year)),
            Self::YearMonth => DimValue::Text(fields.yearmonth.clone()),
            Self::Month => DimValue::Int(i64::from(fields.month)),
            Self::WeekdayAbbr => DimValue::Text(fields.weekday_abbr.clone()),
            Self::Hour => DimValue::Int(i64::from(fields.hour)),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dim| dim.name() == s)
            .ok_or_else(|| AggregateError::InvalidDimension(s.to_string()))
    }
}

/// Value of a dimension for one row.
///
/// Numeric dimensions order numerically, text dimensions lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimValue {
    /// Year, month or hour.
    Int(i64),
    /// Year-month or weekday label.
    Text(String),
}

impl fmt::Display for DimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for DimValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for DimValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
