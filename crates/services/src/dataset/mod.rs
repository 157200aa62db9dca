mod loader;
mod options;
mod source;

pub use loader::parse_csv;
pub use options::FilterOptions;
pub use source::{DatasetSource, FileCsvSource, HttpCsvSource, InMemorySource};

use vocab_core::model::QuestionRecord;

/// Immutable table of validated question records, in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<QuestionRecord>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct filter values present in this dataset.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }
}
