//! perf-tester library
//!
//! An in-process micro-benchmark harness. Each test unit is initialized, then
//! timed over one or more iterations; the batch is ranked as a percentage of
//! its slowest unit and can be rendered as text bars.
//!
//! It is meant for quick comparisons of code paths. There is no warm-up, no
//! outlier rejection and no statistics.
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```rust
//! use perf_tester::{PerformanceTest, PerformanceTester, TestError};
//!
//! struct Concat;
//!
//! impl PerformanceTest for Concat {
//!     fn description(&self) -> &str {
//!         "String concatenation"
//!     }
//!
//!     fn run(&mut self, _data: &()) -> Result<(), TestError> {
//!         let s: String = (0..100).map(|i| i.to_string()).collect();
//!         std::hint::black_box(s);
//!         Ok(())
//!     }
//! }
//!
//! let mut tester = PerformanceTester::new();
//! let results = tester.run_iterations(&mut [Concat], 10)?;
//!
//! for result in &results {
//!     println!("{} ({}ms)", result.description(), result.milliseconds());
//!     println!("[{}]", result.relative_bar(60, '*'));
//! }
//! # Ok::<(), perf_tester::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod result;
pub mod test_unit;
pub mod tester;

pub use config::{CliArgs, ConfigBuilder, ConfigError, OutputFormat, RunConfig};
pub use error::{Error, Phase, Result};
pub use registry::TestRegistry;
pub use result::TestResult;
pub use test_unit::{FnTest, PerformanceTest, TestError};
pub use tester::PerformanceTester;

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct Sleep<const MS: u64>;

    impl<const MS: u64> PerformanceTest for Sleep<MS> {
        fn description(&self) -> &str {
            "sleep"
        }

        fn run(&mut self, _data: &()) -> std::result::Result<(), TestError> {
            thread::sleep(Duration::from_millis(MS));
            Ok(())
        }
    }

    /// **What is tested:** Basic library functionality integration test
    /// **Why it is tested:** Ensures registry, tester and result rendering work together
    /// **Test conditions:** Registers two sleeping tests of 10ms and 30ms and runs the registry
    /// **Expectations:** Slowest at 100 percent and bars of the requested width
    #[test]
    fn test_basic_functionality() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let registry: TestRegistry = TestRegistry::new()
            .with::<Sleep<10>>("short")?
            .with::<Sleep<30>>("long")?;

        let results = PerformanceTester::new().run_registry(&registry, 1, &())?;

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].percent(), 100);
        assert!(results[0].percent() < 100);
        assert!(results.iter().all(|r| r.relative_bar(40, '*').chars().count() == 40));
        Ok(())
    }
}
