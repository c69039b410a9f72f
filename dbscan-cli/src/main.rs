//! CLI entry point for the `dbscan` binary.
//!
//! Parses command-line arguments with clap, runs the requested clustering,
//! renders the summary to stdout and maps errors to exit codes. Logging is
//! initialised first so every later step can emit structured diagnostics.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use dbscan_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use dbscan_providers_dense::{DenseProviderError, SyntheticError};
use tracing::{error, field};

/// Parse CLI arguments, execute the command, render the summary and flush the
/// output stream. A failed verification is reported after the summary.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    summary
        .ensure_verified()
        .context("verification against the serial engine failed")?;
    Ok(())
}

/// Stable machine-readable code for errors that carry one.
fn error_code(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Core(core) => Some(core.code().as_str()),
        CliError::Dense(DenseProviderError::PointSet(points))
        | CliError::Synthetic(SyntheticError::PointSet(points)) => Some(points.code().as_str()),
        _ => None,
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(error_code);
        error!(
            error = %err,
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
