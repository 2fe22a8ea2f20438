//! Descriptive statistics over decimal columns.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

/// Summary statistics of one column.
///
/// Undefined statistics are `None`: everything but `count` for an empty
/// column, and `std` for fewer than two values. `mean` and `std` are also
/// `None` when their intermediate sums leave the decimal range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnStats {
    /// Number of non-empty values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: Option<Decimal>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<Decimal>,
    /// Smallest value.
    pub min: Option<Decimal>,
    /// 25th percentile.
    pub q25: Option<Decimal>,
    /// Median.
    pub q50: Option<Decimal>,
    /// 75th percentile.
    pub q75: Option<Decimal>,
    /// Largest value.
    pub max: Option<Decimal>,
}

impl ColumnStats {
    /// Row labels in display order.
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Computes statistics for `values` (any order).
    #[must_use]
    pub fn from_values(values: &[Decimal]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort();

        let count = sorted.len();
        if count == 0 {
            return Self::default();
        }

        let n = Decimal::from(count);
        let mean = sorted
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
            .map(|sum| sum / n);
        let std = match mean {
            Some(mean) if count >= 2 => sorted
                .iter()
                .try_fold(Decimal::ZERO, |acc, v| {
                    let dev = v.checked_sub(mean)?;
                    acc.checked_add(dev.checked_mul(dev)?)
                })
                .and_then(|squared| (squared / (n - Decimal::ONE)).sqrt()),
            _ => None,
        };

        Self {
            count,
            mean,
            std,
            min: sorted.first().copied(),
            q25: quantile(&sorted, Decimal::new(25, 2)),
            q50: quantile(&sorted, Decimal::new(50, 2)),
            q75: quantile(&sorted, Decimal::new(75, 2)),
            max: sorted.last().copied(),
        }
    }

    /// Values in the order of [`ColumnStats::LABELS`].
    #[must_use]
    pub fn values(&self) -> [Option<Decimal>; 8] {
        [
            Some(Decimal::from(self.count)),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Quantile `q` (0..=1) of ascending `sorted` values, interpolating linearly
/// between the two nearest ranks.
#[must_use]
pub fn quantile(sorted: &[Decimal], q: Decimal) -> Option<Decimal> {
    let last = sorted.len().checked_sub(1)?;
    let rank = q * Decimal::from(last);
    let lower = rank.floor();
    let lower_idx = lower.to_usize()?.min(last);
    let upper_idx = (lower_idx + 1).min(last);
    let fraction = rank - lower;

    let low = sorted[lower_idx];
    let high = sorted[upper_idx];
    Some(low + (high - low) * fraction)
}
