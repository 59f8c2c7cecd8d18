//! Metrics for evaluating prediction accuracy

use crate::error::{ForecastError, Result};

/// Mean squared error between predictions and actual values.
pub fn mean_squared_error(predictions: &[f64], actual: &[f64]) -> Result<f64> {
    check_lengths(predictions, actual)?;

    let sum: f64 = predictions
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum();

    Ok(sum / predictions.len() as f64)
}

/// Mean absolute error between predictions and actual values.
pub fn mean_absolute_error(predictions: &[f64], actual: &[f64]) -> Result<f64> {
    check_lengths(predictions, actual)?;

    let sum: f64 = predictions
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).abs())
        .sum();

    Ok(sum / predictions.len() as f64)
}

/// Accuracy report computed on the raw, unsmoothed prediction sequence.
#[derive(Debug, Clone)]
pub struct Accuracy {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
}

/// Compute the full accuracy report for a prediction sequence.
pub fn accuracy(predictions: &[f64], actual: &[f64]) -> Result<Accuracy> {
    let mse = mean_squared_error(predictions, actual)?;
    let mae = mean_absolute_error(predictions, actual)?;

    Ok(Accuracy {
        mse,
        rmse: mse.sqrt(),
        mae,
    })
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction Accuracy:")?;
        writeln!(f, "  MSE:  {:.4}", self.mse)?;
        writeln!(f, "  RMSE: {:.4}", self.rmse)?;
        writeln!(f, "  MAE:  {:.4}", self.mae)?;
        Ok(())
    }
}

fn check_lengths(predictions: &[f64], actual: &[f64]) -> Result<()> {
    if predictions.len() != actual.len() || predictions.is_empty() {
        return Err(ForecastError::InsufficientHistory(format!(
            "predictions ({}) and actual values ({}) must have the same non-zero length",
            predictions.len(),
            actual.len()
        )));
    }
    Ok(())
}
