//! End-to-end forecasting pipeline
//!
//! Wires the components in strict order: fetch, normalize, build features,
//! train and evaluate, project the horizon. Each run constructs its own dataset
//! and trained model; nothing is shared or persisted across runs.

use crate::engine::{ForecastEngine, TestPrediction};
use crate::error::Result;
use crate::features::{build_dataset, Dataset};
use crate::metrics::Accuracy;
use crate::model::{RandomForest, Regressor};
use crate::projector::{FutureRow, DEFAULT_HORIZON_DAYS};
use crate::series::normalize;
use crate::source::{validate_range, PriceSource};
use chrono::NaiveDate;
use tracing::info;

/// Parameters of one pipeline run.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// First date of the projected horizon
    pub horizon_start: NaiveDate,
    pub horizon_days: usize,
}

impl ForecastRequest {
    /// Build a request with the default 366-day horizon.
    ///
    /// Fails with `InvalidRange` when `start` is not strictly before `end`.
    pub fn new(
        symbol: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        horizon_start: NaiveDate,
    ) -> Result<Self> {
        validate_range(start, end)?;
        Ok(Self {
            symbol: symbol.into(),
            start,
            end,
            horizon_start,
            horizon_days: DEFAULT_HORIZON_DAYS,
        })
    }

    pub fn with_horizon_days(mut self, days: usize) -> Self {
        self.horizon_days = days;
        self
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct ForecastOutput {
    /// Feature table the model was trained and evaluated on
    pub historical: Dataset,
    /// Test-segment predictions, chronological
    pub predictions: Vec<TestPrediction>,
    /// Mean squared error of the raw test predictions
    pub mse: f64,
    /// Full accuracy report (MSE/RMSE/MAE) on the raw test predictions
    pub accuracy: Accuracy,
    /// Projected future horizon, chronological
    pub future: Vec<FutureRow>,
}

impl ForecastOutput {
    /// Historical prices as a chart-ready series.
    pub fn historical_series(&self) -> Vec<(NaiveDate, f64)> {
        self.historical
            .rows()
            .iter()
            .map(|r| (r.date, r.price))
            .collect()
    }

    /// Smoothed test predictions as a chart-ready series.
    pub fn test_series(&self) -> Vec<(NaiveDate, f64)> {
        self.predictions
            .iter()
            .map(|p| (p.date, p.smoothed))
            .collect()
    }

    /// Future predictions as a chart-ready series.
    pub fn future_series(&self) -> Vec<(NaiveDate, f64)> {
        self.future
            .iter()
            .map(|r| (r.date, r.predicted_price))
            .collect()
    }
}

/// Forecasting pipeline over a price source and a regressor.
#[derive(Debug)]
pub struct Pipeline<S: PriceSource, R: Regressor = RandomForest> {
    source: S,
    regressor: R,
}

impl<S: PriceSource> Pipeline<S, RandomForest> {
    /// Pipeline with the default bagged-tree regressor.
    pub fn new(source: S) -> Self {
        Self {
            source,
            regressor: RandomForest::default(),
        }
    }
}

impl<S: PriceSource, R: Regressor> Pipeline<S, R> {
    pub fn with_regressor(source: S, regressor: R) -> Self {
        Self { source, regressor }
    }

    /// Run the full pipeline for one request.
    pub fn run(&self, request: &ForecastRequest) -> Result<ForecastOutput> {
        validate_range(request.start, request.end)?;

        info!(
            symbol = %request.symbol,
            start = %request.start,
            end = %request.end,
            "fetching observations"
        );
        let observations = self
            .source
            .fetch(&request.symbol, request.start, request.end)?;

        let points = normalize(observations)?;
        let dataset = build_dataset(&points)?;
        info!(rows = dataset.len(), "dataset built");

        let mut engine = ForecastEngine::new(self.regressor.clone());
        let report = engine.train(&dataset)?;

        let last = *dataset
            .last_row()
            .expect("a splittable dataset has a last row");
        let future = engine.project(&last, request.horizon_start, request.horizon_days)?;
        info!(
            mse = report.mse,
            horizon_days = future.len(),
            "pipeline run complete"
        );

        Ok(ForecastOutput {
            historical: dataset,
            predictions: report.predictions,
            mse: report.mse,
            accuracy: report.accuracy,
            future,
        })
    }
}
