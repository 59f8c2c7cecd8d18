//! Market data sources
//!
//! The pipeline treats the market feed as an external collaborator behind the
//! [`PriceSource`] trait: one synchronous fetch per run, no retry policy. Callers
//! needing resilience wrap the source themselves.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single raw observation from the market feed.
///
/// `close` is `None` when the feed reported the day without a price; the
/// normalizer forward-fills such gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

impl RawObservation {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    pub fn gap(date: NaiveDate) -> Self {
        Self { date, close: None }
    }
}

/// Validate that `start` is strictly before `end`.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start >= end {
        return Err(ForecastError::InvalidRange { start, end });
    }
    Ok(())
}

/// Contract for a daily closing-price feed.
pub trait PriceSource {
    /// Fetch observations for `symbol` within `[start, end)`.
    ///
    /// Implementations fail with `InvalidRange` when the range is malformed and
    /// `SourceUnavailable` when the feed cannot be reached.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawObservation>>;
}

/// CSV-backed price source with a `date,close` layout.
///
/// An empty `close` field is read as a gap. Rows outside the requested range
/// are filtered out; the symbol is ignored since one file carries one series.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: Option<f64>,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PriceSource for CsvSource {
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawObservation>> {
        validate_range(start, end)?;
        debug!(%symbol, path = %self.path.display(), "reading observations from CSV");

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            ForecastError::SourceUnavailable(format!(
                "cannot open {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut observations = Vec::new();
        for record in reader.deserialize::<CsvRow>() {
            let row = record?;
            if row.date >= start && row.date < end {
                observations.push(RawObservation {
                    date: row.date,
                    close: row.close,
                });
            }
        }

        debug!(rows = observations.len(), "CSV fetch complete");
        Ok(observations)
    }
}

/// In-memory price source for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    observations: Vec<RawObservation>,
}

impl StaticSource {
    pub fn new(observations: Vec<RawObservation>) -> Self {
        Self { observations }
    }
}

impl PriceSource for StaticSource {
    fn fetch(
        &self,
        _symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawObservation>> {
        validate_range(start, end)?;
        Ok(self
            .observations
            .iter()
            .copied()
            .filter(|o| o.date >= start && o.date < end)
            .collect())
    }
}
