//! Synthetic ledger generator for pfi development and testing.
//!
//! Writes a tab-separated ledger with an opening balance followed by random
//! debits and credits, stopping at the row limit or on overdraft.
//!
//! Usage: datagen -c 20 -o ledger.tsv

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pfi_core::datagen::{DataGenerator, write_tsv, write_tsv_file};
use pfi_core::ledger::parse_timestamp;
use pfi_shared::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "datagen")]
#[command(about = "Generate a synthetic tab-separated transaction ledger")]
#[command(version)]
struct Cli {
    /// File to write (stdout when absent)
    #[arg(short = 'o', long = "output-file", value_name = "TSV")]
    output_file: Option<PathBuf>,

    /// Maximum number of rows, opening row included
    #[arg(short = 'c', long)]
    count: Option<usize>,

    /// Opening balance
    #[arg(short = 'b', long)]
    initial_balance: Option<Decimal>,

    /// Random seed for reproducible output
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Timestamp of the opening row (default: now)
    #[arg(long, value_parser = parse_start)]
    start: Option<NaiveDateTime>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// No logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_start(value: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(value).ok_or_else(|| format!("unrecognized timestamp `{value}`"))
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if !cli.quiet {
        let default = if cli.verbose { "pfi=debug" } else { "pfi=info" };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    let mut config = AppConfig::load()
        .context("Failed to load configuration")?
        .generator;
    if let Some(count) = cli.count {
        config.max_count = Some(count);
    }
    if let Some(balance) = cli.initial_balance {
        config.initial_balance = balance;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let rows = DataGenerator::from_config(&config, cli.start);
    let written = match &cli.output_file {
        Some(path) => write_tsv_file(rows, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => write_tsv(rows, io::stdout().lock()).context("Failed to write ledger")?,
    };

    info!(rows = written, "Generated ledger");
    Ok(())
}
