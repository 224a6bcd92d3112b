mod error;
mod recommend;
mod record_file;

use anyhow::{Context, Result};
use dotenv::dotenv;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::LevelFilter;
use recommend::accuracy::Report;
use recommend::engine::Recommender;
use std::ffi::OsString;
use std::path::PathBuf;

#[macro_use]
extern crate log;

lazy_static! {
    static ref MOVIES_FILE: String = env_or("MOVIES_FILE", "movies.csv");
    static ref TRAINING_RATINGS_FILE: String =
        env_or("TRAINING_RATINGS_FILE", "training_ratings.csv");
    static ref TEST_RATINGS_FILE: String = env_or("TEST_RATINGS_FILE", "test_ratings.csv");
    static ref REPORT_FORMAT: String = env_or("REPORT_FORMAT", "text");
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    // read .env
    dotenv().ok();

    // init logger
    let log_level = std::env::var("RUST_LOG").unwrap_or_default();

    if log_level == "debug" {
        Builder::new()
            .filter(None, LevelFilter::Off)
            .filter(Some("mrec::recommend"), LevelFilter::Debug)
            .filter(Some("mrec"), LevelFilter::Debug)
            .init();
    } else if log_level == "info" {
        Builder::new()
            .filter(None, LevelFilter::Off)
            .filter(Some("mrec::recommend"), LevelFilter::Info)
            .filter(Some("mrec"), LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }

    let (movies, training, test) = input_paths(std::env::args_os().skip(1));

    let mut recommender = Recommender::from_files(&movies, &training).with_context(|| {
        format!(
            "load {} and {} failed",
            movies.display(),
            training.display()
        )
    })?;

    let predictions = recommender
        .predict_file(&test)
        .with_context(|| format!("predict {} failed", test.display()))?;
    info!(
        "similarity cache entries: {}",
        recommender.catalog().cached_entries()
    );
    let report = recommender.report(predictions);

    match REPORT_FORMAT.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_report(&report),
        other => {
            warn!("unknown REPORT_FORMAT: {}, using text", other);
            print_report(&report);
        }
    }

    Ok(())
}

// positional arguments override the configured files, in order
fn input_paths(args: impl Iterator<Item = OsString>) -> (PathBuf, PathBuf, PathBuf) {
    let mut args = args.map(PathBuf::from);
    let movies = args.next().unwrap_or_else(|| PathBuf::from(&*MOVIES_FILE));
    let training = args
        .next()
        .unwrap_or_else(|| PathBuf::from(&*TRAINING_RATINGS_FILE));
    let test = args
        .next()
        .unwrap_or_else(|| PathBuf::from(&*TEST_RATINGS_FILE));
    (movies, training, test)
}

fn print_report(report: &Report) {
    println!("Rating predictions: ");
    for p in report.predictions.iter() {
        println!("({}, {:?}, {}, {})", p.user, p.title, p.predicted, p.actual);
    }
    match report.correlation {
        Some(correlation) => println!("Correlation: {}", correlation),
        None => println!("Correlation: undefined"),
    }
    if let Some(mae) = report.mean_absolute_error {
        println!("Mean absolute error: {}", mae);
    }
}
