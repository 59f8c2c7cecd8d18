//! Error types for the gold_forecast crate

use chrono::NaiveDate;
use thiserror::Error;

/// Custom error types for the gold_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Start date is not strictly before the end date
    #[error("Invalid range: start date {start} is not before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The price source could not be reached or returned a malformed payload
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The price source returned zero observations
    #[error("Empty series: the source returned no observations")]
    EmptySeries,

    /// Not enough history to build features or split the dataset
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// A projection was requested before a model was trained in this run
    #[error("Model unavailable: train the forecast engine before projecting")]
    ModelUnavailable,

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
