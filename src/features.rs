//! Feature engineering
//!
//! Derives calendar and trend features from a normalized price series. The
//! trailing moving average uses a positional window of seven rows, so a
//! calendar gap in the underlying series does not widen the window.

use crate::error::{ForecastError, Result};
use crate::series::NormalizedPoint;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of rows in the trailing moving-average window.
pub const MOVING_AVG_WINDOW: usize = 7;

/// Fraction of the dataset used for training in the chronological split.
pub const TRAIN_RATIO: f64 = 0.8;

/// One fully featured row of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub price: f64,
    /// Day of year, 1..=366
    pub day_of_year: u32,
    pub year: i32,
    /// Month, 1..=12
    pub month: u32,
    /// Trailing mean of `price` over this row and the six preceding rows
    pub moving_avg_7: f64,
}

impl FeatureRow {
    /// Feature vector in the fixed order the model is trained with.
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.day_of_year as f64,
            self.year as f64,
            self.month as f64,
            self.moving_avg_7,
        ]
    }

    /// Names matching [`FeatureRow::features`] order.
    pub fn feature_names() -> Vec<String> {
        ["day_of_year", "year", "month", "moving_avg_7"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Chronological, date-deduplicated sequence of feature rows.
///
/// Built once per pipeline run and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<FeatureRow>,
}

/// Chronological train/test partition of a [`Dataset`].
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

/// Build a dataset from a normalized price series.
///
/// Every row whose seven-row window is incomplete (the first six rows) is
/// dropped. Fails with `InsufficientHistory` when fewer than seven points are
/// available, since the dataset would be empty.
pub fn build_dataset(points: &[NormalizedPoint]) -> Result<Dataset> {
    if points.len() < MOVING_AVG_WINDOW {
        return Err(ForecastError::InsufficientHistory(format!(
            "need at least {} normalized points for the moving average, got {}",
            MOVING_AVG_WINDOW,
            points.len()
        )));
    }

    let mut rows = Vec::with_capacity(points.len() - MOVING_AVG_WINDOW + 1);
    let mut window_sum: f64 = points[..MOVING_AVG_WINDOW - 1].iter().map(|p| p.price).sum();

    for i in MOVING_AVG_WINDOW - 1..points.len() {
        let point = points[i];
        window_sum += point.price;
        let moving_avg = window_sum / MOVING_AVG_WINDOW as f64;
        window_sum -= points[i + 1 - MOVING_AVG_WINDOW].price;

        rows.push(FeatureRow {
            date: point.date,
            price: point.price,
            day_of_year: point.date.ordinal(),
            year: point.date.year(),
            month: point.date.month(),
            moving_avg_7: moving_avg,
        });
    }

    Ok(Dataset { rows })
}

impl Dataset {
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_row(&self) -> Option<&FeatureRow> {
        self.rows.last()
    }

    /// Feature matrix in row order, columns per [`FeatureRow::features`].
    pub fn feature_matrix(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|r| r.features()).collect()
    }

    /// Price labels in row order.
    pub fn labels(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.price).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Split chronologically: the first `floor(0.8 N)` rows train, the rest
    /// test. Never a random partition, so the model cannot train on rows that
    /// lie in the test segment's future.
    ///
    /// Fails with `InsufficientHistory` when either side would be empty.
    pub fn split(&self) -> Result<Split> {
        let n = self.rows.len();
        let train_size = (TRAIN_RATIO * n as f64).floor() as usize;

        if train_size == 0 || train_size == n {
            return Err(ForecastError::InsufficientHistory(format!(
                "cannot split {} rows into non-empty train and test sets",
                n
            )));
        }

        Ok(Split {
            train: Dataset {
                rows: self.rows[..train_size].to_vec(),
            },
            test: Dataset {
                rows: self.rows[train_size..].to_vec(),
            },
        })
    }
}
