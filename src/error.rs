//! Error types for MoneyRisk

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid amount '{0}': must be a number from 0.01 to 1000000000000000")]
    InvalidAmount(String),

    #[error("Unknown expense category: {0}")]
    UnknownCategory(String),

    #[error("Unknown expense type '{0}': expected essential or non-essential")]
    UnknownExpenseType(String),

    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    #[error("No {kind} entry with id {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("No data found for {0}. Add income/expenses first.")]
    NoData(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
