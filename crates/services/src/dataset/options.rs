use std::collections::HashSet;

use serde::Serialize;

use vocab_core::model::{Importance, QuestionRecord};

/// Distinct values a user can filter on, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub test_numbers: Vec<String>,
    pub page_numbers: Vec<String>,
    pub importances: Vec<Importance>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_records(records: &[QuestionRecord]) -> Self {
        Self {
            categories: distinct(records, |r| r.category().to_string()),
            test_numbers: distinct(records, |r| r.test_number().to_string()),
            page_numbers: distinct(records, |r| r.page_number().to_string()),
            importances: distinct(records, |r| r.importance().clone()),
        }
    }
}

fn distinct<T, F>(records: &[QuestionRecord], key: F) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash,
    F: Fn(&QuestionRecord) -> T,
{
    let mut seen = HashSet::new();
    records
        .iter()
        .map(key)
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
