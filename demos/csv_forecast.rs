//! Forecast from a `date,close` CSV file.
//!
//! ```bash
//! cargo run --example csv_forecast -- prices.csv 2020-01-01 2025-01-01
//! ```

use chrono::NaiveDate;
use gold_forecast::pipeline::{ForecastRequest, Pipeline};
use gold_forecast::source::CsvSource;
use std::env;

fn main() -> gold_forecast::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: csv_forecast <prices.csv> <start> <end>");
        std::process::exit(2);
    }

    let start: NaiveDate = args[2].parse().expect("start date as YYYY-MM-DD");
    let end: NaiveDate = args[3].parse().expect("end date as YYYY-MM-DD");

    let pipeline = Pipeline::new(CsvSource::new(&args[1]));
    let request = ForecastRequest::new("GC=F", start, end, end)?;
    let output = pipeline.run(&request)?;

    println!("Mean Squared Error: {:.2}", output.mse);
    println!(
        "Projected {} days from {}",
        output.future.len(),
        request.horizon_start
    );

    // Head of the future table, as JSON rows
    for row in output.future.iter().take(5) {
        println!("{}", serde_json::to_string(row).expect("future row serializes"));
    }

    Ok(())
}
