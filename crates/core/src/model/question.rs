use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::RecordIndex;

//
// ─── FIELDS ────────────────────────────────────────────────────────────────────
//

/// The columns a question row is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    Word,
    Definition,
    Example,
    Category,
    TestNumber,
    PageNumber,
    Importance,
}

impl QuestionField {
    /// Every column, in the order the spreadsheet export lists them.
    pub const ALL: [QuestionField; 7] = [
        QuestionField::Word,
        QuestionField::Definition,
        QuestionField::Example,
        QuestionField::Category,
        QuestionField::TestNumber,
        QuestionField::PageNumber,
        QuestionField::Importance,
    ];

    /// Header name of this column in the dataset.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            QuestionField::Word => "Word",
            QuestionField::Definition => "Definition",
            QuestionField::Example => "Example",
            QuestionField::Category => "Category",
            QuestionField::TestNumber => "Test#",
            QuestionField::PageNumber => "Page#",
            QuestionField::Importance => "Importance",
        }
    }

    /// Whether a row must carry a non-empty value for this column.
    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, QuestionField::Example)
    }
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

//
// ─── IMPORTANCE ────────────────────────────────────────────────────────────────
//

/// Importance grade of a word (`A`, `B`, ...).
///
/// The set of grades is open; any trimmed, non-empty label is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Importance(String);

impl Importance {
    /// # Errors
    ///
    /// Returns `RecordError::EmptyImportance` if the label is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordError::EmptyImportance);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("malformed record at row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: QuestionField },

    #[error("importance label cannot be empty")]
    EmptyImportance,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw, unvalidated row as it comes out of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub category: String,
    pub test_number: String,
    pub page_number: String,
    pub importance: String,
}

impl QuestionDraft {
    fn value(&self, field: QuestionField) -> &str {
        match field {
            QuestionField::Word => &self.word,
            QuestionField::Definition => &self.definition,
            QuestionField::Example => &self.example,
            QuestionField::Category => &self.category,
            QuestionField::TestNumber => &self.test_number,
            QuestionField::PageNumber => &self.page_number,
            QuestionField::Importance => &self.importance,
        }
    }

    /// Validate the row and bind it to its dataset position.
    ///
    /// All values are trimmed. Every column except `Example` must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` naming the first empty required column.
    pub fn validate(self, index: RecordIndex) -> Result<QuestionRecord, RecordError> {
        if let Some(field) = QuestionField::ALL
            .into_iter()
            .find(|field| field.is_required() && self.value(*field).trim().is_empty())
        {
            return Err(RecordError::MissingField {
                row: index.row_number(),
                field,
            });
        }

        Ok(QuestionRecord {
            index,
            word: self.word.trim().to_string(),
            definition: self.definition.trim().to_string(),
            example: self.example.trim().to_string(),
            category: self.category.trim().to_string(),
            test_number: self.test_number.trim().to_string(),
            page_number: self.page_number.trim().to_string(),
            importance: Importance::new(self.importance)?,
        })
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// One validated question row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionRecord {
    index: RecordIndex,
    word: String,
    definition: String,
    example: String,
    category: String,
    test_number: String,
    page_number: String,
    importance: Importance,
}

impl QuestionRecord {
    #[must_use]
    pub fn index(&self) -> RecordIndex {
        self.index
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn example(&self) -> &str {
        &self.example
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn test_number(&self) -> &str {
        &self.test_number
    }

    #[must_use]
    pub fn page_number(&self) -> &str {
        &self.page_number
    }

    #[must_use]
    pub fn importance(&self) -> &Importance {
        &self.importance
    }

    /// Value of the given column as text.
    #[must_use]
    pub fn field(&self, field: QuestionField) -> &str {
        match field {
            QuestionField::Word => &self.word,
            QuestionField::Definition => &self.definition,
            QuestionField::Example => &self.example,
            QuestionField::Category => &self.category,
            QuestionField::TestNumber => &self.test_number,
            QuestionField::PageNumber => &self.page_number,
            QuestionField::Importance => self.importance.as_str(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
