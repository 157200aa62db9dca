use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a record in the source dataset (zero-based, data rows only).
///
/// The source carries no stable key, so row position is the record identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordIndex(usize);

impl RecordIndex {
    /// Creates a new `RecordIndex`
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying zero-based index
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns the 1-based data row number, as a spreadsheet user would count it.
    #[must_use]
    pub fn row_number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Debug for RecordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordIndex({})", self.0)
    }
}

impl fmt::Display for RecordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
