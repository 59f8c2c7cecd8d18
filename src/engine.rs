//! Forecast engine
//!
//! Splits the dataset chronologically, fits the regressor on the training rows
//! and evaluates it on the test rows. The reported metric is the mean squared
//! error of the raw predictions; the smoothed sequence exists for display only
//! and never feeds back into the model or the metric.

use crate::error::{ForecastError, Result};
use crate::features::{Dataset, FeatureRow};
use crate::metrics::{self, Accuracy};
use crate::model::{Regressor, TrainedRegressor};
use crate::projector::{self, FutureRow};
use crate::utils::trailing_mean;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Window for smoothing the displayed test predictions.
pub const SMOOTHING_WINDOW: usize = 5;

/// One evaluated test-set prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestPrediction {
    pub date: NaiveDate,
    /// True price of the test row
    pub actual: f64,
    /// Raw model output
    pub raw: f64,
    /// Trailing mean of the raw outputs, shrinking window at the start
    pub smoothed: f64,
}

/// Result of one training/evaluation pass.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub predictions: Vec<TestPrediction>,
    /// Mean squared error between raw predictions and true test prices
    pub mse: f64,
    /// Full accuracy report (MSE/RMSE/MAE) on the raw predictions
    pub accuracy: Accuracy,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Forecast engine owning the trained model for one run.
#[derive(Debug)]
pub struct ForecastEngine<R: Regressor> {
    regressor: R,
    model: Option<R::Trained>,
}

impl<R: Regressor> ForecastEngine<R> {
    pub fn new(regressor: R) -> Self {
        Self {
            regressor,
            model: None,
        }
    }

    /// Split, fit, and evaluate.
    ///
    /// Fails with `InsufficientHistory` when the dataset cannot produce
    /// non-empty train and test sets. On success the trained model stays in the
    /// engine for projection within the same run.
    pub fn train(&mut self, dataset: &Dataset) -> Result<TrainingReport> {
        let split = dataset.split()?;
        debug!(
            train_rows = split.train.len(),
            test_rows = split.test.len(),
            "chronological split"
        );

        let trained = self
            .regressor
            .fit(&split.train.feature_matrix(), &split.train.labels())?;

        let raw = trained.predict(&split.test.feature_matrix());
        let actual = split.test.labels();
        let accuracy = metrics::accuracy(&raw, &actual)?;
        let mse = accuracy.mse;
        let smoothed = trailing_mean(&raw, SMOOTHING_WINDOW);

        let predictions = split
            .test
            .rows()
            .iter()
            .zip(raw.iter().zip(smoothed.iter()))
            .map(|(row, (&raw, &smoothed))| TestPrediction {
                date: row.date,
                actual: row.price,
                raw,
                smoothed,
            })
            .collect();

        info!(model = trained.name(), mse, "training complete");
        self.model = Some(trained);

        Ok(TrainingReport {
            predictions,
            mse,
            accuracy,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
        })
    }

    /// The trained model, or `ModelUnavailable` before a successful `train`.
    pub fn model(&self) -> Result<&R::Trained> {
        self.model.as_ref().ok_or(ForecastError::ModelUnavailable)
    }

    /// Project the future horizon with the model trained in this run.
    pub fn project(
        &self,
        last: &FeatureRow,
        anchor: NaiveDate,
        horizon_days: usize,
    ) -> Result<Vec<FutureRow>> {
        projector::project(self.model()?, last, anchor, horizon_days)
    }
}
