//! Command-line arguments for `vocab-quiz`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use services::DatasetConfig;
use vocab_core::model::{Criterion, FilterCriteria, Importance, QuizMode, RecordError, SampleSize};

#[derive(Parser)]
#[command(
    name = "vocab-quiz",
    version,
    about = "Vocabulary quiz over a word/definition/example spreadsheet",
    long_about = "Vocabulary quiz over a word/definition/example spreadsheet.\n\n\
                  The word list is read once per run from a CSV export (URL or file).\n\
                  Defaults come from VOCAB_QUIZ_DATASET_URL / VOCAB_QUIZ_DATASET_FILE."
)]
pub struct Cli {
    /// Defaults to `quiz` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run an interactive quiz in the terminal.
    Quiz(QuizArgs),

    /// List the categories, tests, pages and importance grades in the dataset.
    Options(OptionsArgs),
}

/// Where to read the word list from (overrides the environment).
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// URL of a CSV export.
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    pub url: Option<String>,

    /// Local CSV file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    #[must_use]
    pub fn dataset_config(&self) -> DatasetConfig {
        DatasetConfig::from_env().with_overrides(self.url.clone(), self.file.clone())
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct QuizArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// What to answer: the meaning of a word, or the word for a meaning.
    #[arg(long, value_enum, default_value = "meaning")]
    pub mode: ModeArg,

    /// Only ask words from this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only ask words from this test number.
    #[arg(long = "test", value_name = "TEST")]
    pub test_number: Option<String>,

    /// Only ask words from this page number.
    #[arg(long = "page", value_name = "PAGE")]
    pub page_number: Option<String>,

    /// Only ask words with this importance grade (A, B, ...).
    #[arg(long)]
    pub importance: Option<String>,

    /// Number of questions: `all`, or a count (clamped to the matching words).
    #[arg(long, value_name = "N|all", default_value = "all")]
    pub count: SampleSize,

    /// Seed for a reproducible question order.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the result of each finished round as JSON to this file.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

impl QuizArgs {
    /// # Errors
    ///
    /// Returns `RecordError::EmptyImportance` for a blank `--importance`.
    pub fn criteria(&self) -> Result<FilterCriteria, RecordError> {
        Ok(FilterCriteria {
            category: Criterion::from_option(self.category.clone()),
            test_number: Criterion::from_option(self.test_number.clone()),
            page_number: Criterion::from_option(self.page_number.clone()),
            importance: Criterion::from_option(
                self.importance.clone().map(Importance::new).transpose()?,
            ),
            sample_size: self.count,
        })
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ModeArg {
    /// Show the word, answer with its meaning.
    #[default]
    Meaning,
    /// Show the meaning, answer with the word.
    Word,
}

impl From<ModeArg> for QuizMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Meaning => QuizMode::AskMeaning,
            ModeArg::Word => QuizMode::AskWord,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quiz_flags_build_criteria() {
        let cli = Cli::try_parse_from([
            "vocab-quiz",
            "quiz",
            "--category",
            "noun",
            "--test",
            "2",
            "--importance",
            "A",
            "--count",
            "10",
            "--mode",
            "word",
        ])
        .unwrap();
        let Some(Command::Quiz(args)) = cli.command else {
            panic!("expected quiz subcommand");
        };
        let criteria = args.criteria().unwrap();
        assert_eq!(criteria.category, Criterion::Only("noun".to_string()));
        assert_eq!(criteria.test_number, Criterion::Only("2".to_string()));
        assert!(criteria.page_number.is_all());
        assert_eq!(criteria.sample_size, SampleSize::count(10).unwrap());
        assert_eq!(QuizMode::from(args.mode), QuizMode::AskWord);
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(Cli::try_parse_from(["vocab-quiz", "quiz", "--count", "0"]).is_err());
    }

    #[test]
    fn url_and_file_conflict() {
        assert!(
            Cli::try_parse_from(["vocab-quiz", "options", "--url", "http://x", "--file", "a.csv"])
                .is_err()
        );
    }

    #[test]
    fn subcommand_is_optional() {
        let cli = Cli::try_parse_from(["vocab-quiz"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn default_quiz_args_ask_everything() {
        let criteria = QuizArgs::default().criteria().unwrap();
        assert_eq!(criteria, FilterCriteria::all());
    }
}
