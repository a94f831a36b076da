//! Test results and relative performance
//!
//! A [`TestResult`] is created by the runner when a unit finishes its timed
//! iterations. Its percentage is only meaningful once [`finalize_results`] has
//! seen the whole batch, because it is relative to the slowest result.

use serde::Serialize;
use std::time::Duration;

/// Outcome of timing one test unit within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    description: String,
    elapsed: Duration,
    iterations: u32,
    milliseconds: u64,
    percent: u8,
}

impl TestResult {
    /// Record the raw measurement of a unit.
    ///
    /// `iterations` of 0 is stored as 1. The percentage stays 0 until the
    /// batch is finalized.
    pub fn new<S: Into<String>>(description: S, elapsed: Duration, iterations: u32) -> Self {
        Self {
            description: description.into(),
            elapsed,
            iterations: iterations.max(1),
            milliseconds: whole_millis(elapsed),
            percent: 0,
        }
    }

    /// Description of the test this result is for
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Total elapsed time across all iterations
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of timed iterations
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Milliseconds reported for this result.
    ///
    /// This is the whole-millisecond total, or the per-iteration average
    /// rounded down when the batch was finalized with averaging enabled.
    pub fn milliseconds(&self) -> u64 {
        self.milliseconds
    }

    /// Performance relative to the slowest result of the batch, 0 to 100
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Render this result as a bar of exactly `width` characters.
    ///
    /// The first `floor(percent / 100 * width)` characters are `fill`, the
    /// rest are spaces.
    ///
    /// ```rust
    /// use perf_tester::result::{finalize_results, TestResult};
    /// use std::time::Duration;
    ///
    /// let mut results = vec![
    ///     TestResult::new("fast", Duration::from_millis(500), 1),
    ///     TestResult::new("slow", Duration::from_millis(1000), 1),
    /// ];
    /// finalize_results(&mut results, false);
    ///
    /// let bar = results[0].relative_bar(60, '*');
    /// assert_eq!(bar, format!("{}{}", "*".repeat(30), " ".repeat(30)));
    /// ```
    pub fn relative_bar(&self, width: usize, fill: char) -> String {
        let count = bar_length(self.percent, width);
        let mut bar = String::with_capacity(width * fill.len_utf8());
        bar.extend(std::iter::repeat(fill).take(count));
        bar.extend(std::iter::repeat(' ').take(width - count));
        bar
    }
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Number of filled cells for `percent` in a bar of `width` cells
fn bar_length(percent: u8, width: usize) -> usize {
    let percent = usize::from(percent.min(100));
    // percent <= 100, so the product only overflows for absurd widths
    width
        .checked_mul(percent)
        .map(|cells| cells / 100)
        .unwrap_or_else(|| (width / 100) * percent)
}

/// Ranking value of one result: a whole-millisecond total over a divisor.
///
/// Kept as a fraction so averaged values are compared without rounding.
#[derive(Debug, Clone, Copy)]
struct RankValue {
    total: u64,
    divisor: u32,
}

impl RankValue {
    fn new(total: u64, divisor: u32) -> Self {
        Self {
            total,
            divisor: divisor.max(1),
        }
    }

    /// `self > other`, compared by cross-multiplication
    fn exceeds(self, other: Self) -> bool {
        u128::from(self.total) * u128::from(other.divisor)
            > u128::from(other.total) * u128::from(self.divisor)
    }
}

/// `min(floor(value / max * 100), 100)` for every value, or all zeros when
/// the maximum is 0
fn rank_percents(values: &[RankValue]) -> Vec<u8> {
    let Some(max) = values
        .iter()
        .copied()
        .reduce(|max, value| if value.exceeds(max) { value } else { max })
    else {
        return Vec::new();
    };
    if max.total == 0 {
        return vec![0; values.len()];
    }

    // Products stay below 2^64 * 2^32 * 100, well inside u128
    values
        .iter()
        .map(|value| {
            let percent = u128::from(value.total) * u128::from(max.divisor) * 100
                / (u128::from(value.divisor) * u128::from(max.total));
            u8::try_from(percent.min(100)).unwrap_or(100)
        })
        .collect()
}

/// Compute percentages of the maximum for a batch of values.
///
/// Every percentage is `min(floor(value / max * 100), 100)`. An empty batch,
/// or a batch whose maximum is 0, yields all zeros.
///
/// ```rust
/// use perf_tester::result::compute_percents;
///
/// assert_eq!(compute_percents(&[250, 500, 1000]), vec![25, 50, 100]);
/// assert_eq!(compute_percents(&[0]), vec![0]);
/// assert!(compute_percents(&[]).is_empty());
/// ```
pub fn compute_percents(values: &[u64]) -> Vec<u8> {
    let values: Vec<RankValue> = values.iter().map(|&v| RankValue::new(v, 1)).collect();
    rank_percents(&values)
}

/// Finalize a batch: choose the ranking value of each result and set its
/// percentage relative to the slowest one.
///
/// With `average` set, results are ranked by their exact per-iteration
/// average (whole-millisecond total over iterations), and `milliseconds()`
/// reports that average rounded down. Batches sharing one iteration count
/// therefore rank identically with and without averaging.
///
/// ```rust
/// use perf_tester::result::{finalize_results, TestResult};
/// use std::time::Duration;
///
/// let mut results = vec![
///     TestResult::new("a", Duration::from_millis(9), 10),
///     TestResult::new("b", Duration::from_millis(19), 10),
/// ];
/// finalize_results(&mut results, true);
///
/// assert_eq!(results[0].milliseconds(), 0);
/// assert_eq!(results[0].percent(), 47);
/// ```
pub fn finalize_results(results: &mut [TestResult], average: bool) {
    let values: Vec<RankValue> = results
        .iter()
        .map(|result| {
            let divisor = if average { result.iterations } else { 1 };
            RankValue::new(whole_millis(result.elapsed), divisor)
        })
        .collect();

    for ((result, value), percent) in results.iter_mut().zip(&values).zip(rank_percents(&values)) {
        result.milliseconds = value.total / u64::from(value.divisor);
        result.percent = percent;
    }
}
