use std::env;
use std::path::PathBuf;

use crate::dataset::{DatasetSource, FileCsvSource, HttpCsvSource};

/// Spreadsheet CSV export the quiz reads by default.
pub const DEFAULT_DATASET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1Ep1NKToR7nQVrKfAdIz3f8Z75TJ70_7j/export?format=csv";

pub const DATASET_URL_ENV: &str = "VOCAB_QUIZ_DATASET_URL";
pub const DATASET_FILE_ENV: &str = "VOCAB_QUIZ_DATASET_FILE";

/// Location of the word list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetLocation {
    Url(String),
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetConfig {
    pub location: DatasetLocation,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            location: DatasetLocation::Url(DEFAULT_DATASET_URL.into()),
        }
    }
}

impl DatasetConfig {
    /// Read the dataset location from the environment.
    ///
    /// A file path wins over a URL; with neither set, the default export URL is used.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(DATASET_URL_ENV).ok(),
            env::var(DATASET_FILE_ENV).ok(),
        )
    }

    fn from_values(url: Option<String>, file: Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        if let Some(file) = non_blank(file) {
            return Self {
                location: DatasetLocation::File(PathBuf::from(file)),
            };
        }
        if let Some(url) = non_blank(url) {
            return Self {
                location: DatasetLocation::Url(url),
            };
        }
        Self::default()
    }

    /// Apply command-line overrides on top of this config.
    #[must_use]
    pub fn with_overrides(self, url: Option<String>, file: Option<PathBuf>) -> Self {
        if let Some(file) = file {
            return Self {
                location: DatasetLocation::File(file),
            };
        }
        if let Some(url) = url {
            return Self {
                location: DatasetLocation::Url(url),
            };
        }
        self
    }

    #[must_use]
    pub fn into_source(self) -> Box<dyn DatasetSource> {
        match self.location {
            DatasetLocation::Url(url) => Box::new(HttpCsvSource::new(url)),
            DatasetLocation::File(path) => Box::new(FileCsvSource::new(path)),
        }
    }
}
