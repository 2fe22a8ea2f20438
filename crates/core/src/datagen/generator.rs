//! Synthetic ledger generation.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use pfi_shared::GeneratorConfig;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::GeneratorError;
use crate::ledger::Transaction;

/// Description prefixes of generated debits.
pub const EXPENSE_PREFIXES: [&str; 3] = ["ABC", "XYZ", "example.com"];
/// Description prefixes of generated credits.
pub const INCOME_PREFIXES: [&str; 1] = ["Paycheck"];
/// Description of the opening row.
pub const OPENING_DESC: &str = "Account Statement";
/// Timestamp format of generated rows.
pub const FIXTURE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DEBIT_SUFFIX_LEN: usize = 10;
const CREDIT_SUFFIX_LEN: usize = 4;
/// Debit range in cents: -100.00 to -0.50.
const DEBIT_CENTS: (i64, i64) = (-10_000, -50);
/// Credit range in cents: 10.00 to 2002.00.
const CREDIT_CENTS: (i64, i64) = (1_000, 200_200);

/// Sequential timestamps, a fixed step apart.
#[derive(Debug, Clone)]
pub struct DateTimeGenerator {
    current: NaiveDateTime,
    step: TimeDelta,
}

impl DateTimeGenerator {
    /// Starts at `start`, advancing by `step_hours` per step.
    #[must_use]
    pub fn new(start: NaiveDateTime, step_hours: i64) -> Self {
        Self {
            current: start,
            step: TimeDelta::hours(step_hours),
        }
    }

    /// Starts at the current local time, truncated to the minute.
    #[must_use]
    pub fn starting_now(step_hours: i64) -> Self {
        let now = Local::now().naive_local();
        let start = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        Self::new(start, step_hours)
    }

    /// The most recently produced timestamp.
    #[must_use]
    pub const fn current(&self) -> NaiveDateTime {
        self.current
    }

    /// Moves the current timestamp by `delta` and returns it.
    pub fn shift(&mut self, delta: TimeDelta) -> NaiveDateTime {
        self.current += delta;
        self.current
    }
}

impl Iterator for DateTimeGenerator {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.current.checked_add_signed(self.step)?;
        Some(self.current)
    }
}

/// Iterator over synthetic ledger rows with a consistent running balance.
///
/// The first row is an opening "Account Statement" with amount 0. Later
/// rows are random debits and credits. Iteration ends at the row limit,
/// once the end timestamp is passed, or right after the balance drops to
/// zero or below.
#[derive(Debug)]
pub struct DataGenerator<R: Rng> {
    rng: R,
    dates: DateTimeGenerator,
    balance: Decimal,
    debit_percent: u8,
    max_count: Option<usize>,
    date_end: Option<NaiveDateTime>,
    count: usize,
    done: bool,
}

impl<R: Rng> DataGenerator<R> {
    /// Creates a generator drawing randomness from `rng`.
    #[must_use]
    pub fn new(rng: R, start: NaiveDateTime, config: &GeneratorConfig) -> Self {
        Self {
            rng,
            dates: DateTimeGenerator::new(start, config.step_hours),
            balance: config.initial_balance,
            debit_percent: config.debit_percent.min(100),
            max_count: config.max_count,
            date_end: None,
            count: 0,
            done: false,
        }
    }

    /// Stops before the first row later than `end`.
    #[must_use]
    pub const fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.date_end = Some(end);
        self
    }

    /// Caps the number of rows, the opening row included.
    #[must_use]
    pub const fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// Current running balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Rows produced so far.
    #[must_use]
    pub const fn generated(&self) -> usize {
        self.count
    }

    fn suffix(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    fn description(&mut self, prefixes: &[&str], suffix_len: usize) -> String {
        let prefix = prefixes[self.rng.random_range(0..prefixes.len())];
        let suffix = self.suffix(suffix_len);
        format!("{prefix} {suffix}")
    }

    fn random_amount(&mut self) -> (String, Decimal) {
        if self.rng.random_range(0..100u8) < self.debit_percent {
            let cents = self.rng.random_range(DEBIT_CENTS.0..=DEBIT_CENTS.1);
            (
                self.description(&EXPENSE_PREFIXES, DEBIT_SUFFIX_LEN),
                Decimal::new(cents, 2),
            )
        } else {
            let cents = self.rng.random_range(CREDIT_CENTS.0..=CREDIT_CENTS.1);
            (
                self.description(&INCOME_PREFIXES, CREDIT_SUFFIX_LEN),
                Decimal::new(cents, 2),
            )
        }
    }
}

impl DataGenerator<StdRng> {
    /// Creates a generator from configuration.
    ///
    /// Seeded from `config.seed` when set, from the OS otherwise. Starts at
    /// `start`, or the current minute when `None`.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig, start: Option<NaiveDateTime>) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let start =
            start.unwrap_or_else(|| DateTimeGenerator::starting_now(config.step_hours).current());
        Self::new(rng, start, config)
    }
}

impl<R: Rng> Iterator for DataGenerator<R> {
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.max_count.is_some_and(|max| self.count >= max) {
            self.done = true;
            return None;
        }

        if self.count == 0 {
            self.count = 1;
            return Some(Transaction {
                position: 0,
                date: self.dates.current(),
                desc: OPENING_DESC.to_string(),
                amount: Decimal::ZERO,
                balance: self.balance,
            });
        }

        let Some(date) = self.dates.next() else {
            self.done = true;
            return None;
        };
        if self.date_end.is_some_and(|end| date > end) {
            self.done = true;
            return None;
        }

        let (desc, amount) = self.random_amount();
        self.balance += amount;
        let position = self.count;
        self.count += 1;

        if self.balance <= Decimal::ZERO {
            debug!(position, balance = %self.balance, "Overdraft, stopping");
            self.done = true;
        }

        Some(Transaction {
            position,
            date,
            desc,
            amount,
            balance: self.balance,
        })
    }
}

/// Writes rows as headerless tab-separated `date desc amount balance` lines.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns `GeneratorError::Write` if a row cannot be written.
pub fn write_tsv<W: Write>(
    rows: impl IntoIterator<Item = Transaction>,
    out: W,
) -> Result<usize, GeneratorError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);

    let mut written = 0;
    for row in rows {
        writer.write_record([
            row.date.format(FIXTURE_DATE_FORMAT).to_string(),
            row.desc,
            row.amount.to_string(),
            row.balance.to_string(),
        ])?;
        written += 1;
    }
    writer.flush().map_err(csv::Error::from)?;

    debug!(rows = written, "Wrote generated ledger");
    Ok(written)
}

/// Writes rows to a new file at `path`.
///
/// # Errors
///
/// Returns `GeneratorError::Io` if the file cannot be created, or
/// `GeneratorError::Write` if a row cannot be written.
pub fn write_tsv_file(
    rows: impl IntoIterator<Item = Transaction>,
    path: &Path,
) -> Result<usize, GeneratorError> {
    let file = File::create(path).map_err(|source| GeneratorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_tsv(rows, file)
}
