//! `vocab-quiz` binary: loads the word list and runs the quiz in the terminal.

mod cli;
mod logging;
mod render;
mod terminal;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use services::dataset::Dataset;
use services::{Clock, DatasetConfig, DatasetSource, QuizController};
use vocab_core::model::QuizSummary;

use crate::cli::{Cli, Command, LogFormatArg, OptionsArgs, QuizArgs};
use crate::logging::{LogConfig, LogFormat, init_logging};
use crate::terminal::Terminal;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    if let Err(err) = run(cli).await {
        // Binary glue: report once.
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: true,
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_else(|| Command::Quiz(QuizArgs::default())) {
        Command::Quiz(args) => run_quiz(&args).await,
        Command::Options(args) => run_options(&args).await,
    }
}

async fn load(config: DatasetConfig) -> Result<Dataset> {
    let source = config.into_source();
    let dataset = source
        .fetch()
        .await
        .with_context(|| format!("could not load word list from {}", source.describe()))?;
    info!(records = dataset.len(), "word list ready");
    Ok(dataset)
}

async fn run_quiz(args: &QuizArgs) -> Result<()> {
    let criteria = args.criteria()?;
    let dataset = load(args.source.dataset_config()).await?;

    let mut controller = QuizController::new(dataset, Clock::default_clock());
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summaries =
        Terminal::new(stdin.lock(), stdout.lock()).run(&mut controller, &criteria, args.mode.into())?;

    if let Some(path) = &args.summary_json {
        write_summaries(path, &summaries)?;
    }
    Ok(())
}

async fn run_options(args: &OptionsArgs) -> Result<()> {
    let dataset = load(args.source.dataset_config()).await?;
    let options = dataset.filter_options();
    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &options)?;
        writeln!(stdout)?;
    } else {
        render::filter_options(&mut stdout, &options)?;
    }
    Ok(())
}

fn write_summaries(path: &Path, summaries: &[QuizSummary]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summaries)
        .with_context(|| format!("could not write {}", path.display()))?;
    info!(path = %path.display(), rounds = summaries.len(), "summaries written");
    Ok(())
}
