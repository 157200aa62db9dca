//! Plain-text rendering of quiz state for the terminal.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use services::{FilterOptions, QuestionView, SessionProgress};
use vocab_core::model::{QuestionField, QuestionRecord, QuizSummary, SampleSize, SessionOrigin};

/// Column order of the mistakes table.
const MISTAKE_COLUMNS: [QuestionField; 7] = [
    QuestionField::Word,
    QuestionField::Definition,
    QuestionField::Example,
    QuestionField::Importance,
    QuestionField::Category,
    QuestionField::TestNumber,
    QuestionField::PageNumber,
];

pub fn question(out: &mut impl Write, view: &QuestionView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}/{}]", view.number, view.total)?;
    writeln!(out, "{}: {}", view.prompt_label, view.prompt)?;
    if !view.example.is_empty() {
        writeln!(out, "Example: {}", view.example)?;
    }
    match &view.answer {
        Some(answer) => {
            writeln!(out, "Answer ({}): {answer}", view.answer_label)?;
            writeln!(out, "[y] correct  [n] incorrect  [q] quit")
        }
        None => writeln!(out, "[enter/r] show answer  [q] quit"),
    }
}

pub fn progress(out: &mut impl Write, progress: &SessionProgress) -> io::Result<()> {
    writeln!(
        out,
        "Progress: {} / {} ({:.0}%)",
        progress.answered,
        progress.total,
        progress.fraction() * 100.0
    )
}

pub fn summary(out: &mut impl Write, summary: &QuizSummary) -> io::Result<()> {
    writeln!(out)?;
    if summary.origin() == SessionOrigin::Review {
        writeln!(out, "Review round finished.")?;
    }
    writeln!(
        out,
        "Score: {} / {} correct ({:.2}%)",
        summary.correct(),
        summary.total(),
        summary.accuracy_percent()
    )?;

    if summary.mistakes().is_empty() {
        writeln!(out, "[t] back to top  [q] quit")
    } else {
        writeln!(out, "Missed words:")?;
        writeln!(out, "{}", mistakes_table(summary.mistakes()))?;
        writeln!(out, "[m] review mistakes  [t] back to top  [q] quit")
    }
}

pub fn mistakes_table(mistakes: &[QuestionRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            MISTAKE_COLUMNS
                .iter()
                .map(|field| Cell::new(field.column()).add_attribute(Attribute::Bold)),
        );
    for record in mistakes {
        table.add_row(MISTAKE_COLUMNS.iter().map(|field| record.field(*field)));
    }
    table
}

pub fn filter_options(out: &mut impl Write, options: &FilterOptions) -> io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec![
            Cell::new("Filter").add_attribute(Attribute::Bold),
            Cell::new("Values").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec![
        QuestionField::Category.column().to_string(),
        options.categories.join(", "),
    ]);
    table.add_row(vec![
        QuestionField::TestNumber.column().to_string(),
        options.test_numbers.join(", "),
    ]);
    table.add_row(vec![
        QuestionField::PageNumber.column().to_string(),
        options.page_numbers.join(", "),
    ]);
    table.add_row(vec![
        QuestionField::Importance.column().to_string(),
        options
            .importances
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    ]);
    table.add_row(vec![
        "Questions".to_string(),
        SampleSize::PRESETS
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    ]);
    writeln!(out, "{table}")
}
