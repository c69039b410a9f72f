//! Command implementations and argument parsing for the `dbscan` CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbscan_core::{
    Clustering, DbscanBuilder, DbscanError, DensityParams, Engine, LabelCounts, PartitionMismatch,
    PointSet, compare_partitions, serial,
};
use dbscan_providers_dense::{
    DenseProviderError, SyntheticError, TwoBlobConfig, generate_two_blobs, read_points_from_path,
    write_labels_to_path,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

const DEFAULT_EPS: f64 = 1.5;
const DEFAULT_MIN_POINTS: usize = 8;
const DEFAULT_THREADS: usize = 8;
const DEFAULT_POINT_COUNT: usize = 30_000;
const DEFAULT_DIMENSIONS: usize = 2;
const DEFAULT_SEED: u64 = 42;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "dbscan", about = "Cluster points with serial or parallel DBSCAN.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a point set and print a summary.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Clustering engine to execute.
    #[arg(long, value_enum, default_value_t = EngineChoice::Grid)]
    pub engine: EngineChoice,

    /// Neighbourhood radius.
    #[arg(long, default_value_t = DEFAULT_EPS)]
    pub eps: f64,

    /// Minimum neighbourhood size (including the point itself) for a core point.
    #[arg(long = "min-pts", default_value_t = DEFAULT_MIN_POINTS)]
    pub min_points: usize,

    /// Worker threads for the parallel engines.
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Write one `x,y,clustered` line per point to this path.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Compare the result against the serial engine.
    #[arg(long)]
    pub verify: bool,

    /// Point source.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Engines selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// Single-threaded reference engine.
    Serial,
    /// Parallel all-pairs neighbourhood scan.
    Naive,
    /// Parallel grid-indexed pipeline.
    Grid,
}

impl From<EngineChoice> for Engine {
    fn from(choice: EngineChoice) -> Self {
        match choice {
            EngineChoice::Serial => Self::Serial,
            EngineChoice::Naive => Self::NaiveParallel,
            EngineChoice::Grid => Self::GridParallel,
        }
    }
}

/// Point sources supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Generate two Gaussian blobs centred at the origin and at 6 on every axis.
    Synthetic(SyntheticArgs),
    /// Read comma-separated points, one per line.
    Csv(CsvArgs),
}

/// Synthetic generation arguments.
#[derive(Debug, Args, Clone)]
pub struct SyntheticArgs {
    /// Number of points to generate.
    #[arg(long = "n", default_value_t = DEFAULT_POINT_COUNT)]
    pub point_count: usize,

    /// Coordinates per point.
    #[arg(long = "d", default_value_t = DEFAULT_DIMENSIONS)]
    pub dimensions: usize,

    /// Seed for the generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// CSV ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct CsvArgs {
    /// Path to the point file.
    pub path: PathBuf,

    /// Override name for the point set (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading points or writing results failed.
    #[error(transparent)]
    Dense(#[from] DenseProviderError),
    /// Synthetic generation failed.
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
    /// Configuring or running the clustering failed.
    #[error(transparent)]
    Core(#[from] DbscanError),
    /// The clustering disagreed with the serial reference.
    #[error("result differs from the serial reference: {mismatch}")]
    Verification {
        /// First disagreement found.
        #[source]
        mismatch: PartitionMismatch,
    },
}

/// Summarises the outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the clustered point set.
    pub data_source: String,
    /// Engine that produced the clustering.
    pub engine: Engine,
    /// Worker threads used by a parallel engine.
    pub threads: usize,
    /// Number of points.
    pub points: usize,
    /// Coordinates per point.
    pub dimensions: usize,
    /// Parameters the clustering ran with.
    pub params: DensityParams,
    /// Wall-clock time spent in the clustering itself.
    pub elapsed: Duration,
    /// Cluster, core, border and noise tallies.
    pub counts: LabelCounts,
    /// Outcome of the comparison with the serial reference, when requested.
    pub verification: Option<Result<(), PartitionMismatch>>,
}

impl ExecutionSummary {
    /// Fails when verification was requested and found a mismatch.
    ///
    /// # Errors
    /// Returns [`CliError::Verification`] carrying the first mismatch.
    pub fn ensure_verified(&self) -> Result<(), CliError> {
        match self.verification {
            Some(Err(mismatch)) => Err(CliError::Verification { mismatch }),
            _ => Ok(()),
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading points, clustering or writing results
/// fails. A failed verification is reported in the summary, not as an error.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dbscan_cli::cli::{Cli, Command, CsvArgs, EngineChoice, RunCommand, RunSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0\n0.1,0\n0.2,0\n10,10\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         engine: EngineChoice::Grid,
///         eps: 0.5,
///         min_points: 2,
///         threads: 2,
///         out: None,
///         verify: true,
///         source: RunSource::Csv(CsvArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!((summary.counts.clusters, summary.counts.noise), (1, 1));
/// assert!(summary.ensure_verified().is_ok());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(engine = field::Empty, threads = field::Empty, source = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let engine = Engine::from(command.engine);
    let dbscan = DbscanBuilder::new()
        .with_eps(command.eps)
        .with_min_points(command.min_points)
        .with_threads(command.threads)
        .with_engine(engine)
        .build()?;

    let span = Span::current();
    span.record("engine", field::display(engine));
    span.record("threads", field::display(command.threads));

    let points = match command.source {
        RunSource::Synthetic(args) => {
            span.record("source", field::display("synthetic"));
            load_synthetic(&args)?
        }
        RunSource::Csv(args) => {
            span.record("source", field::display("csv"));
            load_csv(args)?
        }
    };

    let started = Instant::now();
    let clustering = dbscan.run(&points)?;
    let elapsed = started.elapsed();

    let params = dbscan.params();
    let verification = command
        .verify
        .then(|| verify_against_serial(&points, params, &clustering));
    if let Some(path) = command.out.as_deref() {
        write_labels_to_path(path, &points, &clustering)?;
    }

    let summary = ExecutionSummary {
        data_source: points.name().to_owned(),
        engine,
        threads: command.threads,
        points: points.len(),
        dimensions: points.dimensions(),
        params,
        elapsed,
        counts: clustering.counts(),
        verification,
    };
    info!(
        data_source = summary.data_source.as_str(),
        clusters = summary.counts.clusters,
        elapsed_s = summary.elapsed.as_secs_f64(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.load_synthetic",
    err,
    skip(args),
    fields(points = args.point_count, dimensions = args.dimensions, seed = args.seed),
)]
pub(super) fn load_synthetic(args: &SyntheticArgs) -> Result<PointSet, CliError> {
    let config = TwoBlobConfig {
        point_count: args.point_count,
        dimensions: args.dimensions,
        seed: args.seed,
    };
    Ok(generate_two_blobs(&config)?)
}

#[instrument(
    name = "cli.load_csv",
    err,
    skip(args),
    fields(path = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_csv(args: CsvArgs) -> Result<PointSet, CliError> {
    let CsvArgs { path, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    Ok(read_points_from_path(chosen_name, &path)?)
}

#[instrument(name = "cli.verify", skip_all, fields(items = points.len()))]
fn verify_against_serial(
    points: &PointSet,
    params: DensityParams,
    candidate: &Clustering,
) -> Result<(), PartitionMismatch> {
    let reference = serial::cluster(points, params);
    compare_partitions(points, params, &reference, candidate).inspect_err(|mismatch| {
        warn!(error = %mismatch, "clustering differs from the serial reference");
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Renders `summary` to `writer` as three `key=value` lines.
///
/// The first line describes the run (`threads=` only appears for parallel
/// engines), the second the clustering time in seconds and the third the
/// label tallies, followed by `verified=yes|no` when verification ran.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::time::Duration;
/// # use dbscan_cli::cli::{ExecutionSummary, render_summary};
/// # use dbscan_core::{DensityParams, Engine, LabelCounts};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     engine: Engine::Serial,
///     threads: 8,
///     points: 4,
///     dimensions: 2,
///     params: DensityParams::new(0.5, 2),
///     elapsed: Duration::from_millis(250),
///     counts: LabelCounts { clusters: 1, core: 3, border: 0, noise: 1 },
///     verification: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "impl=serial n=4 d=2 eps=0.5 minPts=2\ntime_s=0.250000\nclusters=1 core=3 border=0 noise=1\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    write!(writer, "impl={}", summary.engine)?;
    if summary.engine.is_parallel() {
        write!(writer, " threads={}", summary.threads)?;
    }
    writeln!(
        writer,
        " n={} d={} eps={} minPts={}",
        summary.points,
        summary.dimensions,
        summary.params.eps(),
        summary.params.min_points(),
    )?;
    writeln!(writer, "time_s={:.6}", summary.elapsed.as_secs_f64())?;

    let counts = summary.counts;
    write!(
        writer,
        "clusters={} core={} border={} noise={}",
        counts.clusters, counts.core, counts.border, counts.noise,
    )?;
    if let Some(outcome) = summary.verification {
        let verdict = if outcome.is_ok() { "yes" } else { "no" };
        write!(writer, " verified={verdict}")?;
    }
    writeln!(writer)
}
