//! Run the full pipeline on a synthetic price series and print the results.
//!
//! ```bash
//! cargo run --example basic_forecast
//! ```

use chrono::{Duration, NaiveDate};
use gold_forecast::pipeline::{ForecastRequest, Pipeline};
use gold_forecast::source::{RawObservation, StaticSource};

fn main() -> gold_forecast::Result<()> {
    tracing_subscriber::fmt::init();

    // A year of synthetic daily gold prices: slow trend plus a seasonal wave.
    let start: NaiveDate = "2024-01-01".parse().unwrap();
    let observations: Vec<RawObservation> = (0..365)
        .map(|i| {
            let trend = 1900.0 + i as f64 * 0.4;
            let wave = (i as f64 / 29.0).sin() * 35.0;
            RawObservation::new(start + Duration::days(i), trend + wave)
        })
        .collect();

    let pipeline = Pipeline::new(StaticSource::new(observations));
    let request = ForecastRequest::new(
        "GC=F",
        start,
        "2025-01-01".parse().unwrap(),
        "2025-01-01".parse().unwrap(),
    )?;

    let output = pipeline.run(&request)?;

    println!("Historical rows: {}", output.historical.len());
    println!("Test predictions: {}", output.predictions.len());
    println!("{}", output.accuracy);

    println!("\nLast five test predictions (actual / raw / smoothed):");
    for p in output.predictions.iter().rev().take(5).rev() {
        println!(
            "  {}  {:>9.2} / {:>9.2} / {:>9.2}",
            p.date, p.actual, p.raw, p.smoothed
        );
    }

    println!("\nFirst five days of the projected horizon:");
    for (date, price) in output.future_series().iter().take(5) {
        println!("  {}  {:>9.2}", date, price);
    }

    Ok(())
}
