//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use vocab_core::model::{QuizError, RecordError, SummaryError};

/// Errors emitted while fetching or parsing a dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("required column '{column}' not found in dataset header")]
    MissingColumn { column: &'static str },
    #[error(transparent)]
    MalformedRecord(#[from] RecordError),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the quiz controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
