//! # Gold Forecast
//!
//! A Rust library for forecasting a daily price series from calendar and trend
//! features with a bagged decision-tree regressor.
//!
//! ## Pipeline
//!
//! Four components run in strict order, each consuming only the previous
//! stage's output:
//!
//! 1. **Series normalizer** ([`series`]): sorts, deduplicates and
//!    forward-fills the raw feed.
//! 2. **Feature builder** ([`features`]): calendar features plus a trailing
//!    7-row moving average; rows with incomplete windows are dropped.
//! 3. **Forecast engine** ([`engine`]): chronological 80/20 split, model
//!    fitting, MSE evaluation on raw predictions, smoothed display sequence.
//! 4. **Horizon projector** ([`projector`]): synthetic future feature rows
//!    with a pinned moving average, predicted by the trained model.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gold_forecast::pipeline::{ForecastRequest, Pipeline};
//! use gold_forecast::source::CsvSource;
//!
//! # fn main() -> gold_forecast::Result<()> {
//! let source = CsvSource::new("gold.csv");
//! let pipeline = Pipeline::new(source);
//!
//! let request = ForecastRequest::new(
//!     "GC=F",
//!     "2020-01-01".parse().unwrap(),
//!     "2025-01-01".parse().unwrap(),
//!     "2025-01-01".parse().unwrap(),
//! )?;
//!
//! let output = pipeline.run(&request)?;
//! println!("test MSE: {:.2}", output.mse);
//! for (date, price) in output.future_series().iter().take(5) {
//!     println!("{date}  {price:.2}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The market feed is an external collaborator behind
//! [`source::PriceSource`]; the crate ships a CSV-backed implementation and an
//! in-memory one for tests. Rendering the two chart series pairs returned by
//! [`pipeline::ForecastOutput`] is the caller's concern.

pub mod engine;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod projector;
pub mod series;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use crate::engine::{ForecastEngine, TestPrediction, TrainingReport};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{build_dataset, Dataset, FeatureRow};
pub use crate::metrics::Accuracy;
pub use crate::model::{RandomForest, Regressor, TrainedRegressor};
pub use crate::pipeline::{ForecastOutput, ForecastRequest, Pipeline};
pub use crate::projector::FutureRow;
pub use crate::series::{normalize, NormalizedPoint};
pub use crate::source::{CsvSource, PriceSource, RawObservation, StaticSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
