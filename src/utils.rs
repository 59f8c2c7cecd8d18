//! Utility functions for the gold_forecast crate

use chrono::{Duration, NaiveDate};

/// Trailing mean with a window that shrinks at the start of the sequence.
///
/// The k-th output (1-indexed) is the mean of the last `min(window, k)` input
/// values ending at k, so the first points are kept rather than discarded while
/// single-point noise is still damped.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    debug_assert!(window > 0);

    let mut smoothed = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        let effective = (i + 1).min(window);
        smoothed.push(sum / effective as f64);
    }

    smoothed
}

/// Consecutive calendar dates covering a future horizon, starting at `anchor`.
pub fn horizon_dates(anchor: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .map(|i| anchor + Duration::days(i as i64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn trailing_mean_shrinks_at_the_start() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
        let smoothed = trailing_mean(&values, 5);

        assert_eq!(smoothed.len(), values.len());
        assert_approx_eq!(smoothed[0], 10.0);
        assert_approx_eq!(smoothed[1], 15.0);
        assert_approx_eq!(smoothed[2], 20.0);
        assert_approx_eq!(smoothed[4], 30.0);
        // Full window from the fifth point on
        assert_approx_eq!(smoothed[5], 40.0);
        assert_approx_eq!(smoothed[6], 50.0);
    }

    #[test]
    fn trailing_mean_of_empty_input_is_empty() {
        assert!(trailing_mean(&[], 5).is_empty());
    }

    #[test]
    fn horizon_dates_are_consecutive() {
        let anchor: NaiveDate = "2025-01-01".parse().unwrap();
        let dates = horizon_dates(anchor, 366);

        assert_eq!(dates.len(), 366);
        assert_eq!(dates[0], anchor);
        assert_eq!(dates[365], "2026-01-01".parse::<NaiveDate>().unwrap());
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }
}
