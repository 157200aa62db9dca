//! Line-oriented quiz loop over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use services::QuizController;
use vocab_core::model::{FilterCriteria, QuizMode, QuizSummary};

use crate::render;

/// One line of user input, already trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Reveal,
    Correct,
    Incorrect,
    ReviewMistakes,
    BackToTop,
    Quit,
    Unknown,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "r" => Self::Reveal,
            "y" => Self::Correct,
            "n" => Self::Incorrect,
            "m" => Self::ReviewMistakes,
            "t" => Self::BackToTop,
            "q" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run quizzes until the user quits or input ends.
    ///
    /// Returns the summary of every round that was finished, review rounds included.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors; rejected commands are reported to the user instead.
    pub fn run(
        &mut self,
        controller: &mut QuizController,
        criteria: &FilterCriteria,
        mode: QuizMode,
    ) -> Result<Vec<QuizSummary>> {
        let mut summaries = Vec::new();
        self.start(controller, criteria, mode)?;

        loop {
            if controller.is_complete() {
                let summary = controller.summary()?;
                render::summary(&mut self.output, &summary)?;
                let has_mistakes = !summary.mistakes().is_empty();
                summaries.push(summary);

                match self.after_round(has_mistakes)? {
                    Command::ReviewMistakes => {
                        controller.review_mistakes()?;
                    }
                    Command::BackToTop => {
                        controller.restart();
                        self.start(controller, criteria, mode)?;
                    }
                    _ => break,
                }
                continue;
            }

            if let Some(progress) = controller.progress() {
                render::progress(&mut self.output, &progress)?;
            }
            if let Some(view) = controller.question_view() {
                render::question(&mut self.output, &view)?;
            }

            let command = self.read_command()?;
            debug!(?command, "input");
            let outcome = match command {
                Command::Reveal => controller.reveal().map(|_| ()),
                Command::Correct => controller.mark_correct().map(|_| ()),
                Command::Incorrect => controller.mark_incorrect().map(|_| ()),
                Command::Quit => break,
                Command::ReviewMistakes | Command::BackToTop | Command::Unknown => {
                    writeln!(self.output, "Unknown command.")?;
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                writeln!(self.output, "{err}")?;
            }
        }

        self.output.flush()?;
        Ok(summaries)
    }

    fn start(
        &mut self,
        controller: &mut QuizController,
        criteria: &FilterCriteria,
        mode: QuizMode,
    ) -> Result<()> {
        let session = controller.start(criteria.clone(), mode);
        if session.is_empty() {
            writeln!(self.output, "No words match these filters.")?;
        } else {
            writeln!(self.output, "{} questions, mode: {mode}", session.len())?;
        }
        Ok(())
    }

    /// Wait for a valid choice on the summary screen. Quit on end of input.
    fn after_round(&mut self, has_mistakes: bool) -> Result<Command> {
        loop {
            match self.read_command()? {
                Command::ReviewMistakes if has_mistakes => return Ok(Command::ReviewMistakes),
                command @ (Command::BackToTop | Command::Quit) => return Ok(command),
                _ => writeln!(self.output, "Unknown command.")?,
            }
        }
    }

    fn read_command(&mut self) -> Result<Command> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Command::Quit);
        }
        Ok(Command::parse(&line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use services::Clock;
    use services::dataset::Dataset;
    use vocab_core::model::{QuestionDraft, RecordIndex, SampleSize, SessionOrigin};
    use vocab_core::time::fixed_now;

    fn controller(words: &[&str]) -> QuizController {
        let records = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                QuestionDraft {
                    word: (*word).into(),
                    definition: format!("meaning of {word}"),
                    example: String::new(),
                    category: "noun".into(),
                    test_number: "1".into(),
                    page_number: "1".into(),
                    importance: "A".into(),
                }
                .validate(RecordIndex::new(i))
                .unwrap()
            })
            .collect();
        QuizController::new(Dataset::new(records), Clock::fixed(fixed_now())).with_seed(3)
    }

    fn play(controller: &mut QuizController, script: &str) -> (Vec<QuizSummary>, String) {
        let mut output = Vec::new();
        let summaries = Terminal::new(Cursor::new(script.as_bytes()), &mut output)
            .run(controller, &FilterCriteria::all(), QuizMode::AskMeaning)
            .unwrap();
        (summaries, String::from_utf8(output).unwrap())
    }

    #[test]
    fn answering_every_question_prints_the_score() {
        let mut controller = controller(&["嗜み", "趣"]);
        let (summaries, output) = play(&mut controller, "\ny\nr\nn\nq\n");

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].correct(), 1);
        assert!(output.contains("Score: 1 / 2 correct (50.00%)"));
        assert!(output.contains("[m] review mistakes"));
    }

    #[test]
    fn marking_before_reveal_is_reported() {
        let mut controller = controller(&["嗜み"]);
        let (summaries, output) = play(&mut controller, "y\nq\n");

        assert!(summaries.is_empty());
        assert!(output.contains("cannot mark correct while the quiz is awaiting reveal"));
        assert_eq!(controller.progress().unwrap().answered, 0);
    }

    #[test]
    fn review_round_replays_mistakes() {
        let mut controller = controller(&["嗜み", "趣", "省みる"]);
        let (summaries, output) = play(&mut controller, "r\nn\nr\ny\nr\nn\nm\nr\ny\nr\ny\nq\n");

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].origin(), SessionOrigin::Review);
        assert_eq!(summaries[1].total(), 2);
        assert_eq!(summaries[1].correct(), 2);
        assert!(output.contains("Review round finished."));
    }

    #[test]
    fn review_is_not_offered_without_mistakes() {
        let mut controller = controller(&["嗜み"]);
        let (summaries, output) = play(&mut controller, "r\ny\nm\nq\n");

        assert_eq!(summaries.len(), 1);
        assert!(!output.contains("[m] review mistakes"));
        assert!(output.contains("Unknown command."));
    }

    #[test]
    fn back_to_top_starts_a_fresh_round() {
        let mut controller = controller(&["嗜み", "趣"]);
        let (summaries, _) = play(&mut controller, "r\nn\nr\nn\nt\nq\n");

        assert_eq!(summaries.len(), 1);
        let session = controller.session().unwrap();
        assert_eq!(session.origin(), SessionOrigin::Fresh);
        assert_eq!(session.position(), 0);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn empty_selection_finishes_immediately() {
        let mut controller = controller(&[]);
        let (summaries, output) = play(&mut controller, "");

        assert!(output.contains("No words match these filters."));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total(), 0);
        assert!(output.contains("(0.00%)"));
    }

    #[test]
    fn end_of_input_quits() {
        let mut controller = controller(&["嗜み"]);
        let mut output = Vec::new();
        let criteria = FilterCriteria::all().with_sample_size(SampleSize::count(1).unwrap());
        let summaries = Terminal::new(Cursor::new(Vec::new()), &mut output)
            .run(&mut controller, &criteria, QuizMode::AskWord)
            .unwrap();
        assert!(summaries.is_empty());
    }
}
