//! Configuration module for perf-tester
//!
//! This module turns command line input into a validated [`RunConfig`].
//!
//! # Priority Logic
//!
//! Configuration values are resolved with the following priority:
//!
//! 1. CLI parameters (highest priority)
//! 2. Hardcoded defaults
//!
//! # Usage
//!
//! ```rust
//! use perf_tester::config::{CliArgs, ConfigError, RunConfig};
//!
//! let cli_args = CliArgs {
//!     iterations: Some(5),
//!     average: true,
//!     ..CliArgs::default()
//! };
//!
//! match RunConfig::from_cli(cli_args) {
//!     Ok(config) => {
//!         assert_eq!(config.iterations(), 5);
//!         assert_eq!(config.bar_width(), 60);
//!     }
//!     Err(ConfigError::InvalidCliArgument { argument, .. }) => {
//!         panic!("unexpected invalid argument {argument}");
//!     }
//! }
//! ```

pub mod app_config;
pub mod config_error;

pub use app_config::{CliArgs, ConfigBuilder, OutputFormat, RunConfig};
pub use config_error::ConfigError;
