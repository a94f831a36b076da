//! Benchmark runner
//!
//! The [`PerformanceTester`] times a batch of test units one after another and
//! ranks them against the slowest one.

use crate::error::{Error, Phase, Result};
use crate::registry::TestRegistry;
use crate::result::{finalize_results, TestResult};
use crate::test_unit::PerformanceTest;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs test units under a uniform initialize, run and time protocol
///
/// A tester keeps the results of its last batch. Each `run*` call replaces
/// them and hands the caller its own copy.
#[derive(Debug, Clone, Default)]
pub struct PerformanceTester {
    /// Rank by per-iteration average instead of the accumulated total
    average_results: bool,
    /// Results of the last completed batch
    results: Vec<TestResult>,
}

impl PerformanceTester {
    /// Create a tester that ranks by accumulated totals
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style toggle for averaging
    #[must_use]
    pub fn with_average_results(mut self, average: bool) -> Self {
        self.average_results = average;
        self
    }

    /// Toggle averaging for subsequent runs
    pub fn set_average_results(&mut self, average: bool) {
        self.average_results = average;
    }

    /// Whether results are ranked by per-iteration average
    pub fn average_results(&self) -> bool {
        self.average_results
    }

    /// Results of the last completed batch
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Run each test once without input data
    pub fn run<T>(&mut self, tests: &mut [T]) -> Result<Vec<TestResult>>
    where
        T: PerformanceTest,
    {
        self.run_with_data(tests, 1, &())
    }

    /// Run each test `iterations` times without input data
    pub fn run_iterations<T>(&mut self, tests: &mut [T], iterations: u32) -> Result<Vec<TestResult>>
    where
        T: PerformanceTest,
    {
        self.run_with_data(tests, iterations, &())
    }

    /// Run a single test
    pub fn run_one<D, T>(&mut self, test: &mut T, iterations: u32, data: &D) -> Result<TestResult>
    where
        D: ?Sized,
        T: PerformanceTest<D> + ?Sized,
    {
        let mut results = self.run_with_data(&mut [test], iterations, data)?;
        results
            .pop()
            .ok_or_else(|| Error::invalid_argument("single test produced no result"))
    }

    /// Construct a test of type `T` with `Default` and run it
    pub fn run_type<D, T>(&mut self, iterations: u32, data: &D) -> Result<TestResult>
    where
        D: ?Sized,
        T: PerformanceTest<D> + Default,
    {
        let mut test = T::default();
        self.run_one(&mut test, iterations, data)
    }

    /// Resolve the named tests from `registry` and run them in the order given.
    ///
    /// Unknown names fail before any test is constructed or timed.
    pub fn run_named<D, I, S>(
        &mut self,
        registry: &TestRegistry<D>,
        names: I,
        iterations: u32,
        data: &D,
    ) -> Result<Vec<TestResult>>
    where
        D: ?Sized + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tests = registry.resolve(names).inspect_err(|_| self.results.clear())?;
        self.run_with_data(&mut tests, iterations, data)
    }

    /// Run every test in `registry` in registration order
    pub fn run_registry<D>(
        &mut self,
        registry: &TestRegistry<D>,
        iterations: u32,
        data: &D,
    ) -> Result<Vec<TestResult>>
    where
        D: ?Sized + 'static,
    {
        let mut tests = registry.instantiate_all();
        self.run_with_data(&mut tests, iterations, data)
    }

    /// Time every test in input order and rank the batch.
    ///
    /// For each test, `initialize` runs untimed, then `run` is called
    /// `iterations` times while a single timer covers the whole loop. An
    /// iteration count of 0 is treated as 1. The first failing test aborts
    /// the batch and no results are kept.
    pub fn run_with_data<D, T>(
        &mut self,
        tests: &mut [T],
        iterations: u32,
        data: &D,
    ) -> Result<Vec<TestResult>>
    where
        D: ?Sized,
        T: PerformanceTest<D>,
    {
        self.results.clear();

        let iterations = if iterations == 0 {
            warn!("iteration count of 0 treated as 1");
            1
        } else {
            iterations
        };

        let mut results = Vec::with_capacity(tests.len());
        for test in tests.iter_mut() {
            results.push(Self::time_test(test, iterations, data)?);
        }

        finalize_results(&mut results, self.average_results);
        info!(
            tests = results.len(),
            iterations,
            average = self.average_results,
            "benchmark batch finished"
        );

        self.results.clone_from(&results);
        Ok(results)
    }

    fn time_test<D, T>(test: &mut T, iterations: u32, data: &D) -> Result<TestResult>
    where
        D: ?Sized,
        T: PerformanceTest<D>,
    {
        test.initialize(data)
            .map_err(|e| Error::test_failed(test.description(), Phase::Initialize, e))?;

        let start = Instant::now();
        for _ in 0..iterations {
            test.run(data)
                .map_err(|e| Error::test_failed(test.description(), Phase::Run, e))?;
        }
        let result = TestResult::new(test.description(), start.elapsed(), iterations);

        debug!(
            test = result.description(),
            iterations,
            elapsed_ms = result.milliseconds(),
            "test timed"
        );
        Ok(result)
    }
}
