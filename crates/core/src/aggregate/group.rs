//! Grouped sums over a single dimension.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::dimension::{DimValue, Dimension};
use crate::calendar::DerivedRow;

/// Sum of `amount` per value of one dimension, in natural value order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSum {
    dimension: Dimension,
    sums: BTreeMap<DimValue, Decimal>,
}

impl GroupSum {
    /// Partitions `rows` by `dimension` and sums each partition's amounts.
    #[must_use]
    pub fn compute(rows: &[DerivedRow], dimension: Dimension) -> Self {
        let mut sums: BTreeMap<DimValue, Decimal> = BTreeMap::new();
        for row in rows {
            *sums
                .entry(dimension.value_of(&row.calendar))
                .or_insert(Decimal::ZERO) += row.transaction.amount;
        }
        Self { dimension, sums }
    }

    /// The grouping dimension.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Sum for one dimension value.
    #[must_use]
    pub fn get(&self, value: &DimValue) -> Option<Decimal> {
        self.sums.get(value).copied()
    }

    /// Iterates over `(value, sum)` pairs in natural value order.
    pub fn iter(&self) -> impl Iterator<Item = (&DimValue, Decimal)> {
        self.sums.iter().map(|(value, sum)| (value, *sum))
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// Returns true when there are no groups (empty input).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Sum over all groups.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.sums.values().copied().sum()
    }
}
