use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use vocab_core::model::QuestionRecord;

use super::{Dataset, parse_csv};
use crate::error::DatasetError;

/// Where a quiz gets its word list from. Fetched once per run, never retried.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, for logs and error messages.
    fn describe(&self) -> String;

    /// Fetch and validate the whole dataset.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` if the data cannot be fetched or a row is malformed.
    async fn fetch(&self) -> Result<Dataset, DatasetError>;
}

/// CSV export served over HTTP(S), e.g. a spreadsheet `export?format=csv` link.
#[derive(Clone, Debug)]
pub struct HttpCsvSource {
    client: Client,
    url: String,
}

impl HttpCsvSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpCsvSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Dataset, DatasetError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(DatasetError::HttpStatus(response.status()));
        }
        let body = response.bytes().await?;
        let dataset = parse_csv(body.as_ref())?;
        info!(url = %self.url, records = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}

/// CSV file on the local filesystem.
#[derive(Clone, Debug)]
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileCsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Dataset, DatasetError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DatasetError::Io {
                path: self.path.clone(),
                source,
            })?;
        let dataset = parse_csv(bytes.as_slice())?;
        info!(path = %self.path.display(), records = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}

/// Already-parsed records, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    records: Vec<QuestionRecord>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetSource for InMemorySource {
    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }

    async fn fetch(&self) -> Result<Dataset, DatasetError> {
        Ok(Dataset::new(self.records.clone()))
    }
}
