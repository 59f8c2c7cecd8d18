//! Series normalization
//!
//! Turns a raw feed sequence into a clean chronological price series: sorted,
//! deduplicated by date, forward-filled. Leading gaps with no prior price are
//! dropped rather than zero-filled.

use crate::error::{ForecastError, Result};
use crate::source::RawObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fully defined point of the normalized price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Normalize a raw observation sequence.
///
/// Observations are sorted by date; on duplicate dates the last observation
/// wins (a feed re-publishing a correction supersedes the earlier row). Missing
/// or non-finite prices are forward-filled from the most recent prior price, so
/// a `NaN` close from a malformed feed row never reaches the feature table.
///
/// Fails with `EmptySeries` when the input holds zero observations. A gap-free,
/// already-sorted series passes through unchanged.
pub fn normalize(mut observations: Vec<RawObservation>) -> Result<Vec<NormalizedPoint>> {
    if observations.is_empty() {
        return Err(ForecastError::EmptySeries);
    }

    observations.sort_by_key(|o| o.date);

    let mut points: Vec<NormalizedPoint> = Vec::with_capacity(observations.len());
    let mut last_price: Option<f64> = None;

    for obs in observations {
        let price = match obs.close {
            Some(p) if p.is_finite() => {
                last_price = Some(p);
                p
            }
            _ => match last_price {
                Some(p) => p,
                // Leading gap with nothing to fill from.
                None => continue,
            },
        };

        match points.last_mut() {
            Some(prev) if prev.date == obs.date => prev.price = price,
            _ => points.push(NormalizedPoint {
                date: obs.date,
                price,
            }),
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn forward_fills_interior_gaps() {
        let observations = vec![
            RawObservation::new(d("2023-01-02"), 100.0),
            RawObservation::gap(d("2023-01-03")),
            RawObservation::new(d("2023-01-04"), 104.0),
        ];

        let points = normalize(observations).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].price, 100.0);
        assert_eq!(points[2].price, 104.0);
    }

    #[test]
    fn drops_leading_gaps() {
        let observations = vec![
            RawObservation::gap(d("2023-01-01")),
            RawObservation::gap(d("2023-01-02")),
            RawObservation::new(d("2023-01-03"), 101.0),
        ];

        let points = normalize(observations).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, d("2023-01-03"));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            normalize(Vec::new()),
            Err(ForecastError::EmptySeries)
        ));
    }

    #[test]
    fn non_finite_closes_are_treated_as_gaps() {
        let observations = vec![
            RawObservation::new(d("2023-01-02"), 100.0),
            RawObservation::new(d("2023-01-03"), f64::NAN),
            RawObservation::new(d("2023-01-04"), f64::INFINITY),
            RawObservation::new(d("2023-01-05"), 104.0),
        ];

        let points = normalize(observations).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[1].price, 100.0);
        assert_eq!(points[2].price, 100.0);
        assert!(points.iter().all(|p| p.price.is_finite()));
    }

    #[test]
    fn leading_non_finite_closes_are_dropped() {
        let observations = vec![
            RawObservation::new(d("2023-01-02"), f64::NAN),
            RawObservation::new(d("2023-01-03"), 101.0),
        ];

        let points = normalize(observations).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, d("2023-01-03"));
    }

    #[test]
    fn duplicate_dates_keep_the_last_observation() {
        let observations = vec![
            RawObservation::new(d("2023-01-02"), 100.0),
            RawObservation::new(d("2023-01-02"), 102.5),
        ];

        let points = normalize(observations).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 102.5);
    }
}
