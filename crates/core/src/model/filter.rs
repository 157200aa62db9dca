use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::{Importance, QuestionRecord};

//
// ─── CRITERION ─────────────────────────────────────────────────────────────────
//

/// A single filter constraint: either anything goes, or exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Criterion<T> {
    /// Build a criterion from an optional value; `None` means no constraint.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Criterion::All, Criterion::Only)
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Criterion::All)
    }

    /// Exact-match test; `All` accepts everything.
    pub fn accepts<U: ?Sized>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Criterion::All => true,
            Criterion::Only(expected) => expected == value,
        }
    }
}

//
// ─── SAMPLE SIZE ───────────────────────────────────────────────────────────────
//

/// How many questions to draw from the matching records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleSize {
    #[default]
    All,
    Count(NonZeroUsize),
}

impl SampleSize {
    /// Default choices offered to a user picking a quiz length.
    pub const PRESETS: [SampleSize; 5] = [
        SampleSize::All,
        SampleSize::Count(NonZeroUsize::new(30).unwrap()),
        SampleSize::Count(NonZeroUsize::new(20).unwrap()),
        SampleSize::Count(NonZeroUsize::new(10).unwrap()),
        SampleSize::Count(NonZeroUsize::new(5).unwrap()),
    ];

    /// # Errors
    ///
    /// Returns `SampleSizeError::Zero` for a count of zero.
    pub fn count(n: usize) -> Result<Self, SampleSizeError> {
        NonZeroUsize::new(n)
            .map(SampleSize::Count)
            .ok_or(SampleSizeError::Zero)
    }

    /// Number of records to take out of a pool of `available`.
    #[must_use]
    pub fn clamp(self, available: usize) -> usize {
        match self {
            SampleSize::All => available,
            SampleSize::Count(n) => n.get().min(available),
        }
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSize::All => f.write_str("all"),
            SampleSize::Count(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SampleSizeError {
    #[error("sample size must be a positive number")]
    Zero,
    #[error("invalid sample size '{0}': expected 'all' or a positive number")]
    Invalid(String),
}

impl FromStr for SampleSize {
    type Err = SampleSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(SampleSize::All);
        }
        let n: usize = trimmed
            .parse()
            .map_err(|_| SampleSizeError::Invalid(trimmed.to_string()))?;
        SampleSize::count(n)
    }
}

//
// ─── FILTER CRITERIA ───────────────────────────────────────────────────────────
//

/// Constraints applied to the dataset when a quiz starts.
///
/// Every non-`All` criterion must match (logical AND, exact match).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Criterion<String>,
    pub test_number: Criterion<String>,
    pub page_number: Criterion<String>,
    pub importance: Criterion<Importance>,
    pub sample_size: SampleSize,
}

impl FilterCriteria {
    /// No constraints, all matches in shuffled order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Criterion::Only(category.into());
        self
    }

    #[must_use]
    pub fn with_test_number(mut self, test_number: impl Into<String>) -> Self {
        self.test_number = Criterion::Only(test_number.into());
        self
    }

    #[must_use]
    pub fn with_page_number(mut self, page_number: impl Into<String>) -> Self {
        self.page_number = Criterion::Only(page_number.into());
        self
    }

    #[must_use]
    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = Criterion::Only(importance);
        self
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: SampleSize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Whether `record` satisfies every non-`All` constraint.
    #[must_use]
    pub fn matches(&self, record: &QuestionRecord) -> bool {
        self.category.accepts(record.category())
            && self.test_number.accepts(record.test_number())
            && self.page_number.accepts(record.page_number())
            && self.importance.accepts(record.importance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, RecordIndex};

    fn record(category: &str, test: &str, importance: &str) -> QuestionRecord {
        QuestionDraft {
            word: "w".into(),
            definition: "d".into(),
            example: String::new(),
            category: category.into(),
            test_number: test.into(),
            page_number: "1".into(),
            importance: importance.into(),
        }
        .validate(RecordIndex::new(0))
        .unwrap()
    }

    #[test]
    fn default_criteria_accept_everything() {
        assert!(FilterCriteria::all().matches(&record("noun", "1", "A")));
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let criteria = FilterCriteria::all()
            .with_category("noun")
            .with_importance(Importance::new("B").unwrap());
        assert!(!criteria.matches(&record("noun", "1", "A")));
        assert!(!criteria.matches(&record("verb", "1", "B")));
        assert!(criteria.matches(&record("noun", "2", "B")));
    }

    #[test]
    fn criterion_accepts_borrowed_and_owned_values() {
        let category = Criterion::Only("noun".to_string());
        assert!(category.accepts("noun"));
        assert!(!category.accepts("verb"));
        assert!(Criterion::<String>::All.accepts("anything"));

        let grade = Criterion::Only(Importance::new("A").unwrap());
        assert!(grade.accepts(&Importance::new("A").unwrap()));
    }

    #[test]
    fn match_is_exact() {
        let criteria = FilterCriteria::all().with_test_number("1");
        assert!(!criteria.matches(&record("noun", "10", "A")));
    }

    #[test]
    fn sample_size_clamps_to_available() {
        assert_eq!(SampleSize::count(30).unwrap().clamp(4), 4);
        assert_eq!(SampleSize::count(3).unwrap().clamp(4), 3);
        assert_eq!(SampleSize::All.clamp(4), 4);
    }

    #[test]
    fn sample_size_parses_all_and_numbers() {
        assert_eq!("ALL".parse::<SampleSize>().unwrap(), SampleSize::All);
        assert_eq!("10".parse::<SampleSize>().unwrap(), SampleSize::count(10).unwrap());
        assert_eq!("0".parse::<SampleSize>(), Err(SampleSizeError::Zero));
        assert!(matches!(
            "ten".parse::<SampleSize>(),
            Err(SampleSizeError::Invalid(_))
        ));
    }

    #[test]
    fn presets_start_with_all() {
        assert_eq!(SampleSize::PRESETS[0], SampleSize::All);
        assert_eq!(SampleSize::PRESETS[4].to_string(), "5");
    }
}
