//! End-to-end report runs: read, aggregate, assemble, write.

use std::path::Path;

use chrono::NaiveDate;
use pfi_shared::{AppConfig, AppError, AppResult, GeneratorConfig, RenderConfig};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregate::{Aggregator, Dimension};
use crate::calendar::derive_ledger;
use crate::datagen::{DataGenerator, write_tsv_file};
use crate::ledger::{Ledger, read_ledger};
use crate::reports::{ReportBuilder, ReportTree, ReportWriter};

/// Seed of the self-check fixture.
pub const SELF_CHECK_SEED: u64 = 20_150_101;
/// Row limit of the self-check fixture.
pub const SELF_CHECK_ROWS: usize = 200;

/// Result of a completed report run.
#[derive(Debug, Clone)]
pub struct ReportRun {
    /// The parsed ledger.
    pub ledger: Ledger,
    /// The assembled report.
    pub tree: ReportTree,
}

/// Reads `input` and assembles the standard report without writing it.
///
/// # Errors
///
/// Returns `AppError::Io` or `AppError::Parse` if the ledger cannot be read,
/// or `AppError::DuplicateKey` if report assembly fails.
pub fn build_report(input: &Path, config: &RenderConfig) -> AppResult<ReportRun> {
    let ledger = read_ledger(input)?;
    info!(input = %input.display(), rows = ledger.len(), "Read ledger");

    let tree = ReportBuilder::build(&ledger, config)?;
    Ok(ReportRun { ledger, tree })
}

/// Reads `input`, builds the standard report and writes it as HTML to
/// `output`. Nothing is written unless every step succeeds.
///
/// # Errors
///
/// Returns the first error of any step.
pub fn run_report(input: &Path, output: &Path, config: &RenderConfig) -> AppResult<ReportRun> {
    let run = build_report(input, config)?;
    ReportWriter::new(config.clone()).write_html_file(
        output,
        &input.display().to_string(),
        &run.tree,
    )?;
    Ok(run)
}

/// Counts of a successful self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfCheck {
    /// Rows in the generated fixture.
    pub rows: usize,
    /// Sum of the fixture's amounts.
    pub total: Decimal,
}

/// Generates a seeded fixture in a temporary directory, runs the whole
/// pipeline on it and verifies the aggregation invariants.
///
/// # Errors
///
/// Returns `AppError::Internal` naming the first violated invariant, or the
/// error of any failing pipeline step.
pub fn self_check(config: &AppConfig) -> AppResult<SelfCheck> {
    let dir = tempfile::tempdir().map_err(|err| AppError::Io(err.to_string()))?;
    let input = dir.path().join("ledger.tsv");
    let output = dir.path().join("report.html");

    let generator = GeneratorConfig {
        seed: Some(config.generator.seed.unwrap_or(SELF_CHECK_SEED)),
        max_count: Some(config.generator.max_count.unwrap_or(SELF_CHECK_ROWS)),
        ..config.generator.clone()
    };
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).and_then(|d| d.and_hms_opt(6, 0, 0));
    let written = write_tsv_file(DataGenerator::from_config(&generator, start), &input)?;

    let run = run_report(&input, &output, &config.render)?;
    verify(&run.ledger, written)?;

    let html = std::fs::read_to_string(&output).map_err(|err| AppError::Io(err.to_string()))?;
    if !html.contains(r#"<div id="toc"></div>"#) {
        return Err(AppError::Internal("report document is incomplete".to_string()));
    }

    let total = run.ledger.total_amount();
    info!(rows = written, %total, "Self-check passed");
    Ok(SelfCheck {
        rows: written,
        total,
    })
}

fn verify(ledger: &Ledger, expected_rows: usize) -> AppResult<()> {
    let fail = |what: String| {
        warn!(check = %what, "Self-check failed");
        Err(AppError::Internal(what))
    };

    if ledger.len() != expected_rows {
        return fail(format!(
            "read {} rows, generated {expected_rows}",
            ledger.len()
        ));
    }

    let total = ledger.total_amount();
    let rows = derive_ledger(ledger);
    for dimension in Dimension::ALL {
        let sum = Aggregator::group_sum(&rows, dimension).total();
        if sum != total {
            return fail(format!("group sum by {dimension} is {sum}, expected {total}"));
        }
        let corner = Aggregator::pivot_sum(&rows, &[dimension]).grand_total();
        if corner != total {
            return fail(format!("pivot by {dimension} totals {corner}, expected {total}"));
        }
    }
    Ok(())
}
