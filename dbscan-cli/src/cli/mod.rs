//! Command-line interface orchestration for the `dbscan` binary.
//!
//! The `run` command clusters either a synthetic two-blob set or a CSV point
//! file with the selected engine, optionally checks the result against the
//! serial reference and writes a labelled results file.

mod commands;

pub use commands::{
    Cli, CliError, Command, CsvArgs, EngineChoice, ExecutionSummary, RunCommand, RunSource,
    SyntheticArgs, render_summary, run_cli,
};
