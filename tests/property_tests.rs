//! Property tests for the percentage math and bar rendering
//!
//! Uses synthetic results so the properties hold independently of clock noise.

use perf_tester::result::{compute_percents, finalize_results};
use perf_tester::TestResult;
use proptest::prelude::*;
use quickcheck_macros::quickcheck;
use std::time::Duration;

fn synthetic(millis: &[u64], iterations: u32) -> Vec<TestResult> {
    millis
        .iter()
        .enumerate()
        .map(|(i, &ms)| TestResult::new(format!("unit {i}"), Duration::from_millis(ms), iterations))
        .collect()
}

proptest! {
    /// **What is tested:** Bounds of computed percentages
    /// **Why it is tested:** Percentages must always lie in [0, 100]
    /// **Test conditions:** Arbitrary batches of values up to u64::MAX
    /// **Expectations:** Every percentage is at most 100 and the output matches the input length
    #[test]
    fn prop_percents_in_range(values in prop::collection::vec(any::<u64>(), 0..32)) {
        let percents = compute_percents(&values);
        prop_assert_eq!(percents.len(), values.len());
        prop_assert!(percents.iter().all(|&p| p <= 100));
    }

    /// **What is tested:** The slowest result reports exactly 100
    /// **Why it is tested:** Percentages are relative to the batch maximum
    /// **Test conditions:** Non-empty batches with at least one non-zero value
    /// **Expectations:** Maximum percentage is 100 and it belongs to a maximal value
    #[test]
    fn prop_max_is_hundred(values in prop::collection::vec(1u64..1_000_000, 1..32)) {
        let percents = compute_percents(&values);
        let max_value = *values.iter().max().unwrap();
        prop_assert_eq!(percents.iter().copied().max(), Some(100));
        for (value, percent) in values.iter().zip(&percents) {
            if *value == max_value {
                prop_assert_eq!(*percent, 100);
            }
        }
    }

    /// **What is tested:** Zero maximum yields zeros
    /// **Why it is tested:** Degenerate timings must not divide by zero
    /// **Test conditions:** Batches made only of zeros
    /// **Expectations:** All percentages are 0
    #[test]
    fn prop_all_zero_batch(len in 0usize..32) {
        let values = vec![0u64; len];
        prop_assert!(compute_percents(&values).iter().all(|&p| p == 0));
    }

    /// **What is tested:** Percentages preserve the ordering of values
    /// **Why it is tested:** A slower unit can never rank as faster than a quicker one
    /// **Test conditions:** Arbitrary batches
    /// **Expectations:** value a <= value b implies percent a <= percent b
    #[test]
    fn prop_percents_monotonic(values in prop::collection::vec(0u64..10_000, 1..16)) {
        let percents = compute_percents(&values);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] <= values[j] {
                    prop_assert!(percents[i] <= percents[j]);
                }
            }
        }
    }

    /// **What is tested:** Percentages follow the truncating formula
    /// **Why it is tested:** The formula is floor(value / max * 100), never rounded up
    /// **Test conditions:** Arbitrary batches with a non-zero maximum
    /// **Expectations:** Each percentage equals value * 100 / max in integer arithmetic
    #[test]
    fn prop_percents_truncate(values in prop::collection::vec(0u64..1_000_000, 1..16)) {
        let max = *values.iter().max().unwrap();
        prop_assume!(max > 0);
        let percents = compute_percents(&values);
        for (value, percent) in values.iter().zip(percents) {
            prop_assert_eq!(u64::from(percent), value * 100 / max);
        }
    }

    /// **What is tested:** Averaging as a uniform scaling
    /// **Why it is tested:** With a shared iteration count, averaging must not change the ranking
    /// **Test conditions:** Arbitrary totals, not necessarily multiples of the shared N
    /// **Expectations:** Averaged and raw batches report identical percentages
    #[test]
    fn prop_average_matches_raw_ranking(
        totals in prop::collection::vec(0u64..1_000_000, 1..16),
        iterations in 1u32..2_000,
    ) {
        let mut averaged = synthetic(&totals, iterations);
        finalize_results(&mut averaged, true);
        let mut raw = synthetic(&totals, iterations);
        finalize_results(&mut raw, false);

        for ((avg, raw), total) in averaged.iter().zip(&raw).zip(&totals) {
            prop_assert_eq!(avg.milliseconds(), total / u64::from(iterations));
            prop_assert_eq!(raw.milliseconds(), *total);
            prop_assert_eq!(avg.percent(), raw.percent());
        }
    }
}

/// **What is tested:** Bar width for any percentage and width
/// **Why it is tested:** Bars must line up in columns regardless of the value
/// **Test conditions:** Random millisecond pairs rendered at random widths
/// **Expectations:** Every bar is exactly `width` characters long
#[quickcheck]
fn qc_bar_has_exact_width(fast: u16, slow: u16, width: u8) -> bool {
    let mut results = synthetic(&[u64::from(fast), u64::from(slow)], 1);
    finalize_results(&mut results, false);
    let width = usize::from(width);
    results
        .iter()
        .all(|r| r.relative_bar(width, '█').chars().count() == width)
}

/// **What is tested:** Fill count of the bar
/// **Why it is tested:** The filled part is floor(percent / 100 * width)
/// **Test conditions:** Random millisecond pairs rendered at random widths
/// **Expectations:** Count of fill characters matches the formula and they come first
#[quickcheck]
fn qc_bar_fill_count(fast: u16, slow: u16, width: u8) -> bool {
    let mut results = synthetic(&[u64::from(fast), u64::from(slow)], 1);
    finalize_results(&mut results, false);
    let width = usize::from(width);
    results.iter().all(|r| {
        let bar = r.relative_bar(width, '#');
        let filled = usize::from(r.percent()) * width / 100;
        bar.starts_with(&"#".repeat(filled)) && bar.chars().filter(|&c| c == '#').count() == filled
    })
}
