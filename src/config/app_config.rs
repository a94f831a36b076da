//! Run configuration module
//!
//! This module provides the configuration of a benchmark run, combining CLI
//! arguments with defaults.

use super::ConfigError;

/// Default width of the relative performance bar
pub const DEFAULT_BAR_WIDTH: usize = 60;
/// Default character used to draw the bar
pub const DEFAULT_FILL: char = '*';

/// CLI arguments structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Number of timed iterations per test
    pub iterations: Option<u32>,
    /// Rank by per-iteration average
    pub average: bool,
    /// Width of the rendered bar
    pub width: Option<usize>,
    /// Bar fill character, as typed on the command line
    pub fill: Option<String>,
    /// Comma-separated test names to run instead of all tests
    pub tests: Option<String>,
    /// Emit JSON instead of text
    pub json: bool,
}

/// How results are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Description, elapsed milliseconds and bar per test
    #[default]
    Text,
    /// A JSON array of results
    Json,
}

/// Resolved configuration of a benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    iterations: u32,
    average_results: bool,
    bar_width: usize,
    fill: char,
    tests: Option<Vec<String>>,
    output: OutputFormat,
}

/// Configuration builder
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    iterations: Option<u32>,
    average_results: Option<bool>,
    bar_width: Option<usize>,
    fill: Option<char>,
    tests: Option<Vec<String>>,
    output: Option<OutputFormat>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            iterations: None,
            average_results: None,
            bar_width: None,
            fill: None,
            tests: None,
            output: None,
        }
    }

    /// Set the iteration count. 0 is passed through and run once by the tester.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set averaging
    #[must_use]
    pub const fn with_average_results(mut self, average: bool) -> Self {
        self.average_results = Some(average);
        self
    }

    /// Set bar width
    #[must_use]
    pub const fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = Some(width);
        self
    }

    /// Set bar fill character
    #[must_use]
    pub const fn with_fill(mut self, fill: char) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Restrict the run to the given test names
    #[must_use]
    pub fn with_tests(mut self, tests: Option<Vec<String>>) -> Self {
        self.tests = tests;
        self
    }

    /// Set output format
    #[must_use]
    pub const fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = Some(output);
        self
    }

    /// Build the final RunConfig
    pub fn build(self) -> RunConfig {
        RunConfig {
            iterations: self.iterations.unwrap_or(1),
            average_results: self.average_results.unwrap_or(false),
            bar_width: self.bar_width.unwrap_or(DEFAULT_BAR_WIDTH),
            fill: self.fill.unwrap_or(DEFAULT_FILL),
            tests: self.tests,
            output: self.output.unwrap_or_default(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

impl RunConfig {
    /// Create a RunConfig from CLI arguments
    ///
    /// CLI values win; anything not given falls back to the defaults.
    pub fn from_cli(cli_args: CliArgs) -> Result<Self, ConfigError> {
        let builder = ConfigBuilder::new()
            .with_iterations(cli_args.iterations.unwrap_or(1))
            .with_average_results(cli_args.average)
            .with_bar_width(Self::resolve_bar_width(cli_args.width)?)
            .with_fill(Self::resolve_fill(cli_args.fill.as_deref())?)
            .with_tests(
                cli_args
                    .tests
                    .as_deref()
                    .map(Self::parse_cli_test_names)
                    .transpose()?,
            )
            .with_output(if cli_args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            });

        Ok(builder.build())
    }

    fn resolve_bar_width(width: Option<usize>) -> Result<usize, ConfigError> {
        match width {
            Some(0) => Err(ConfigError::invalid_cli_argument(
                "--width",
                "0",
                "a positive integer",
            )),
            Some(width) => Ok(width),
            None => Ok(DEFAULT_BAR_WIDTH),
        }
    }

    fn resolve_fill(fill: Option<&str>) -> Result<char, ConfigError> {
        let Some(fill) = fill else {
            return Ok(DEFAULT_FILL);
        };

        let mut chars = fill.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Ok(c),
            _ => Err(ConfigError::invalid_cli_argument(
                "--fill",
                fill,
                "exactly one printable character",
            )),
        }
    }

    /// Parse and validate a comma-separated list of test names
    pub fn parse_cli_test_names(names_str: &str) -> Result<Vec<String>, ConfigError> {
        let names: Vec<String> = names_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        (!names.is_empty()).then_some(names).ok_or_else(|| {
            ConfigError::invalid_cli_argument(
                "--tests",
                names_str,
                "comma-separated list of non-empty test names",
            )
        })
    }

    /// Timed iterations per test
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether results are ranked by per-iteration average
    pub fn average_results(&self) -> bool {
        self.average_results
    }

    /// Width of the rendered bar
    pub fn bar_width(&self) -> usize {
        self.bar_width
    }

    /// Bar fill character
    pub fn fill(&self) -> char {
        self.fill
    }

    /// Selected test names, or None to run every registered test
    pub fn tests(&self) -> Option<&[String]> {
        self.tests.as_deref()
    }

    /// Output format
    pub fn output(&self) -> OutputFormat {
        self.output
    }
}
