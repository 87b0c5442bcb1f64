//! Error types for loading weather data and configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while turning a CSV file into a [`DataSet`](crate::data::model::DataSet).
#[derive(Error, Debug)]
pub enum DataError {
    /// CSV reading or row deserialization failed (includes I/O errors).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A `Date` cell could not be parsed as a calendar date.
    #[error("Row {row}: unrecognised date '{value}'")]
    InvalidDate { row: usize, value: String },

    /// Two rows resolve to the same calendar day.
    #[error("Duplicate date {date}: every day must appear once")]
    DuplicateDate { date: NaiveDate },

    /// The file had a header but no rows.
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,
}

impl DataError {
    /// Short title for the status line.
    pub fn title(&self) -> &'static str {
        match self {
            DataError::Csv(_) => "CSV Error",
            DataError::InvalidDate { .. } => "Invalid Date",
            DataError::DuplicateDate { .. } => "Duplicate Date",
            DataError::EmptyDataset => "Empty Dataset",
        }
    }
}

/// Errors raised while reading an [`AppConfig`](crate::config::AppConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid layout for {chart}: {reason}")]
    Layout { chart: &'static str, reason: String },
}
