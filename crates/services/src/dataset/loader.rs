//! CSV parsing for the word list export.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use vocab_core::model::{QuestionDraft, QuestionField, RecordIndex};

use super::Dataset;
use crate::error::DatasetError;

/// Column positions of each `QuestionField` in a particular header row,
/// indexed in `QuestionField::ALL` order.
struct ColumnMap {
    positions: [usize; 7],
}

impl ColumnMap {
    fn from_header(header: &StringRecord) -> Result<Self, DatasetError> {
        let mut positions = [0_usize; 7];
        for (slot, field) in positions.iter_mut().zip(QuestionField::ALL) {
            *slot = header
                .iter()
                .position(|name| normalize_header(name) == field.column())
                .ok_or(DatasetError::MissingColumn {
                    column: field.column(),
                })?;
        }
        Ok(Self { positions })
    }

    fn draft(&self, row: &StringRecord) -> QuestionDraft {
        let get = |field: QuestionField| {
            let pos = self.positions[field as usize];
            row.get(pos).unwrap_or_default().to_string()
        };
        QuestionDraft {
            word: get(QuestionField::Word),
            definition: get(QuestionField::Definition),
            example: get(QuestionField::Example),
            category: get(QuestionField::Category),
            test_number: get(QuestionField::TestNumber),
            page_number: get(QuestionField::PageNumber),
            importance: get(QuestionField::Importance),
        }
    }
}

fn normalize_header(name: &str) -> &str {
    name.trim_start_matches('\u{feff}').trim()
}

/// Parse a CSV export into a validated `Dataset`.
///
/// The header must name every column in `QuestionField::ALL`; extra columns
/// are ignored. Rows are validated as they are read, so a bad row fails the
/// whole load instead of surfacing later inside a quiz.
///
/// # Errors
///
/// Returns `DatasetError::MissingColumn` for an incomplete header,
/// `DatasetError::MalformedRecord` for a row missing a required value, and
/// `DatasetError::Csv` for unreadable CSV.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_header(csv.headers()?)?;

    let mut records = Vec::new();
    for (index, row) in csv.records().enumerate() {
        let row = row?;
        let record = columns.draft(&row).validate(RecordIndex::new(index))?;
        records.push(record);
    }

    debug!(records = records.len(), "parsed dataset");
    Ok(Dataset::new(records))
}
