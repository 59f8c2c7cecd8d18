//! Horizon projection
//!
//! Builds a synthetic feature table for a fixed future horizon and applies a
//! trained model to it. The moving average of every future row is pinned to the
//! last value observed in the dataset: the pipeline does not feed its own
//! forecasts back into the trend feature, so forecast quality degrades over the
//! horizon as the feature goes stale.

use crate::error::Result;
use crate::features::FeatureRow;
use crate::model::TrainedRegressor;
use crate::utils::horizon_dates;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default projection horizon in days.
pub const DEFAULT_HORIZON_DAYS: usize = 366;

/// One projected row of the future horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureRow {
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub year: i32,
    pub month: u32,
    /// Last known dataset moving average, held constant over the horizon
    pub moving_avg_7: f64,
    pub predicted_price: f64,
}

impl FutureRow {
    /// Feature vector in the order the model was trained with.
    fn features(&self) -> Vec<f64> {
        vec![
            self.day_of_year as f64,
            self.year as f64,
            self.month as f64,
            self.moving_avg_7,
        ]
    }
}

/// Project `horizon_days` consecutive days starting at `anchor`.
///
/// Calendar features derive from each actual future date; the trend feature is
/// pinned to `last.moving_avg_7`.
pub fn project<M: TrainedRegressor>(
    model: &M,
    last: &FeatureRow,
    anchor: NaiveDate,
    horizon_days: usize,
) -> Result<Vec<FutureRow>> {
    let pinned_avg = last.moving_avg_7;

    let future = horizon_dates(anchor, horizon_days)
        .into_iter()
        .map(|date| {
            let mut row = FutureRow {
                date,
                day_of_year: date.ordinal(),
                year: date.year(),
                month: date.month(),
                moving_avg_7: pinned_avg,
                predicted_price: 0.0,
            };
            row.predicted_price = model.predict_one(&row.features());
            row
        })
        .collect();

    Ok(future)
}
