//! pfi ledger report
//!
//! Reads a tab-separated transaction ledger and writes an HTML report of
//! sums grouped and pivoted by year, month, weekday and hour.
//!
//! Usage: pfi -i <input.tsv> -o <report.html>

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pfi_core::pipeline::{ReportRun, run_report, self_check};
use pfi_core::reports::{ReportWriter, Table};
use pfi_shared::{AppConfig, AppError, AppResult, RenderConfig};

#[derive(Parser, Debug)]
#[command(name = "pfi")]
#[command(about = "Build an HTML report from a tab-separated transaction ledger")]
#[command(version)]
struct Cli {
    /// Ledger file: date, desc, amount, balance (tab-separated, no header)
    #[arg(short = 'i', long = "input-file", value_name = "TSV")]
    #[arg(required_unless_present = "test")]
    input_file: Option<PathBuf>,

    /// HTML report to write (replaced atomically)
    #[arg(short = 'o', long = "output-file", value_name = "HTML")]
    #[arg(required_unless_present = "test")]
    output_file: Option<PathBuf>,

    /// Debug logging; also print the ledger and the text report to stdout
    #[arg(short, long)]
    verbose: bool,

    /// No logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run the built-in self-check on a generated ledger and exit
    #[arg(short = 't', long = "test")]
    test: bool,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(code = err.error_code(), "Run failed");
            eprintln!("pfi: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Installs the stderr log subscriber unless `quiet`.
fn init_tracing(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }
    let default = if verbose { "pfi=debug" } else { "pfi=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> AppResult<()> {
    let config = AppConfig::load()?;

    if cli.test {
        let check = self_check(&config)?;
        println!(
            "self-check passed: {} rows, total amount {}",
            check.rows, check.total
        );
        return Ok(());
    }

    let (Some(input), Some(output)) = (&cli.input_file, &cli.output_file) else {
        return Err(AppError::Usage(
            "--input-file and --output-file are required".to_string(),
        ));
    };

    let run = run_report(input, output, &config.render)?;

    if cli.verbose {
        print_report(&run, &config.render).map_err(|err| AppError::Io(err.to_string()))?;
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        rows = run.ledger.len(),
        "Report written"
    );
    Ok(())
}

/// Prints the parsed ledger, then the text report, to stdout.
fn print_report(run: &ReportRun, config: &RenderConfig) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for line in Table::from(&run.ledger).render_text(config) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    ReportWriter::new(config.clone()).write_text(&mut out, &run.tree)
}
