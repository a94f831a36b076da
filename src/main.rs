//! CLI entry point for perf-tester
//!
//! Runs the built-in demo tests and prints each result with a bar showing its
//! performance relative to the slowest test.


use clap::Parser;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use demo_tests::DemoData;
use perf_tester::{
    CliArgs, Error, OutputFormat, PerformanceTester, Result, RunConfig, TestRegistry, TestResult,
};

/// Number of elements handed to the data-driven demo tests
const DEMO_DATA_LEN: usize = 100_000;

/// Compare the run time of the built-in demo tests
#[derive(Parser)]
#[command(name = "perf-tester")]
#[command(version, about, long_about = None)]
struct Args {
    /// Timed iterations per test (0 is treated as 1)
    #[arg(short = 'n', long, value_name = "COUNT")]
    iterations: Option<u32>,

    /// Rank tests by per-iteration average instead of total time
    #[arg(short, long)]
    average: bool,

    /// Width of the relative performance bar
    #[arg(short, long, value_name = "WIDTH")]
    width: Option<usize>,

    /// Character used to draw the bar
    #[arg(long, value_name = "CHAR")]
    fill: Option<String>,

    /// Tests to run (overrides running all tests)
    #[arg(
        short,
        long,
        value_name = "NAMES",
        help = "Comma-separated test names (e.g., 'quarter,half')",
        long_help = "Run only the named tests, in the order given. \
                     Names are trimmed and empty names are filtered out. \
                     Use --list to see the available names."
    )]
    tests: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List the available test names and exit
    #[arg(long)]
    list: bool,
}

/// Convert CLI args to CliArgs struct for RunConfig
impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            iterations: args.iterations,
            average: args.average,
            width: args.width,
            fill: args.fill.clone(),
            tests: args.tests.clone(),
            json: args.json,
        }
    }
}

/// Run the selected tests of `registry` according to `config`
fn run_with_config(
    registry: &TestRegistry<DemoData>,
    config: &RunConfig,
    data: &DemoData,
) -> Result<Vec<TestResult>> {
    let mut tester = PerformanceTester::new().with_average_results(config.average_results());

    match config.tests() {
        Some(names) => tester.run_named(registry, names, config.iterations(), data),
        None => tester.run_registry(registry, config.iterations(), data),
    }
}

/// Write results in the configured output format
fn write_results<W: Write>(mut writer: W, results: &[TestResult], config: &RunConfig) -> Result<()> {
    match config.output() {
        OutputFormat::Text => {
            for result in results {
                writeln!(writer, "{} ({}ms)", result.description(), result.milliseconds())?;
                writeln!(
                    writer,
                    "[{}]",
                    result.relative_bar(config.bar_width(), config.fill())
                )?;
                writeln!(writer)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, results).map_err(io::Error::from)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Report an error detected before any test was timed and exit with status 2
fn handle_argument_error(error: Error) -> ! {
    eprintln!("{error}");
    process::exit(2);
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = RunConfig::from_cli(CliArgs::from(&args))
        .map_err(Error::from)
        .unwrap_or_else(|error| handle_argument_error(error));

    let registry = demo_tests::registry()?;
    let stdout = io::stdout();

    if args.list {
        let mut out = stdout.lock();
        for name in registry.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let data = DemoData::generate(DEMO_DATA_LEN);
    let results = match run_with_config(&registry, &config, &data) {
        Err(error) if error.is_argument_error() => handle_argument_error(error),
        result => result?,
    };
    write_results(stdout.lock(), &results, &config)?;
    Ok(())
}
