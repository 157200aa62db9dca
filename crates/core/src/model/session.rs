use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::question::QuestionRecord;

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// Which side of a record the user is asked to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    /// Show the word and example; the answer is the definition.
    #[default]
    AskMeaning,
    /// Show the definition and example; the answer is the word.
    AskWord,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::AskMeaning => f.write_str("ask meaning"),
            QuizMode::AskWord => f.write_str("ask word"),
        }
    }
}

/// How a session's queue was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOrigin {
    /// Filtered and sampled from the dataset.
    #[default]
    Fresh,
    /// Replaying the mistakes of an earlier session.
    Review,
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Transition requested on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Reveal,
    MarkCorrect,
    MarkIncorrect,
    ReviewMistakes,
    Summarize,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionAction::Reveal => "reveal",
            SessionAction::MarkCorrect => "mark correct",
            SessionAction::MarkIncorrect => "mark incorrect",
            SessionAction::ReviewMistakes => "review mistakes",
            SessionAction::Summarize => "summarize",
        };
        f.write_str(name)
    }
}

/// Observable state of the quiz, as seen by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    /// A question is showing; its answer is hidden.
    Asking,
    /// A question is showing with its answer revealed, waiting for a mark.
    Revealed,
    Complete,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::NotStarted => "not started",
            SessionState::Asking => "awaiting reveal",
            SessionState::Revealed => "awaiting a mark",
            SessionState::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot {action} while the quiz is {state}")]
    InvalidStateTransition {
        action: SessionAction,
        state: SessionState,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run of the quiz over a queue that is fixed when the session is created.
///
/// Invariant: `score + mistakes.len() == position <= queue.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    mode: QuizMode,
    origin: SessionOrigin,
    queue: Vec<QuestionRecord>,
    position: usize,
    score: usize,
    mistakes: Vec<QuestionRecord>,
    answer_revealed: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over `queue`. An empty queue is complete immediately.
    #[must_use]
    pub fn new(
        mode: QuizMode,
        origin: SessionOrigin,
        queue: Vec<QuestionRecord>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let completed_at = queue.is_empty().then_some(started_at);
        Self {
            mode,
            origin,
            queue,
            position: 0,
            score: 0,
            mistakes: Vec::new(),
            answer_revealed: false,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    #[must_use]
    pub fn queue(&self) -> &[QuestionRecord] {
        &self.queue
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn mistakes(&self) -> &[QuestionRecord] {
        &self.mistakes
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.queue.get(self.position)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position == self.queue.len()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else if self.answer_revealed {
            SessionState::Revealed
        } else {
            SessionState::Asking
        }
    }

    /// Fraction of the whole queue answered correctly, `0.0` for an empty queue.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        if self.queue.is_empty() {
            0.0
        } else {
            self.score as f64 / self.queue.len() as f64
        }
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy() * 100.0
    }

    /// Show the answer of the current question.
    ///
    /// Returns `false` without touching state when the session is complete.
    pub fn reveal(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.answer_revealed = true;
        true
    }

    /// Record the current question as answered correctly and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidStateTransition` if the answer has not been
    /// revealed or the session is already complete.
    pub fn mark_correct(&mut self, answered_at: DateTime<Utc>) -> Result<(), QuizError> {
        self.ensure_markable(SessionAction::MarkCorrect)?;
        self.score += 1;
        self.advance(answered_at);
        Ok(())
    }

    /// Record the current question as a mistake and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidStateTransition` if the answer has not been
    /// revealed or the session is already complete.
    pub fn mark_incorrect(&mut self, answered_at: DateTime<Utc>) -> Result<(), QuizError> {
        self.ensure_markable(SessionAction::MarkIncorrect)?;
        let missed = self.queue[self.position].clone();
        self.mistakes.push(missed);
        self.advance(answered_at);
        Ok(())
    }

    /// A new session over this session's mistakes, in the order they were made.
    #[must_use]
    pub fn review_mistakes(&self, started_at: DateTime<Utc>) -> QuizSession {
        QuizSession::new(
            self.mode,
            SessionOrigin::Review,
            self.mistakes.clone(),
            started_at,
        )
    }

    fn ensure_markable(&self, action: SessionAction) -> Result<(), QuizError> {
        match self.state() {
            SessionState::Revealed => Ok(()),
            state => Err(QuizError::InvalidStateTransition { action, state }),
        }
    }

    fn advance(&mut self, at: DateTime<Utc>) {
        self.position += 1;
        self.answer_revealed = false;
        if self.is_complete() {
            // Wall clocks can step backwards.
            self.completed_at = Some(at.max(self.started_at));
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, RecordIndex};
    use crate::time::fixed_now;

    fn record(index: usize, word: &str) -> QuestionRecord {
        QuestionDraft {
            word: word.into(),
            definition: format!("meaning of {word}"),
            example: String::new(),
            category: "noun".into(),
            test_number: "1".into(),
            page_number: "1".into(),
            importance: "A".into(),
        }
        .validate(RecordIndex::new(index))
        .unwrap()
    }

    fn abc() -> QuizSession {
        QuizSession::new(
            QuizMode::AskMeaning,
            SessionOrigin::Fresh,
            vec![record(0, "A"), record(1, "B"), record(2, "C")],
            fixed_now(),
        )
    }

    #[test]
    fn three_question_scenario() {
        let mut session = abc();
        let now = fixed_now();

        assert!(session.reveal());
        session.mark_correct(now).unwrap();
        assert!(session.reveal());
        session.mark_incorrect(now).unwrap();
        assert!(session.reveal());
        session.mark_correct(now).unwrap();

        assert_eq!(session.score(), 2);
        assert_eq!(session.mistakes().len(), 1);
        assert_eq!(session.mistakes()[0].word(), "B");
        assert!(session.is_complete());
        assert!((session.accuracy() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(session.completed_at(), Some(now));
    }

    #[test]
    fn mark_before_reveal_is_rejected() {
        let mut session = abc();
        let err = session.mark_correct(fixed_now()).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidStateTransition {
                action: SessionAction::MarkCorrect,
                state: SessionState::Asking,
            }
        );
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn mark_incorrect_before_reveal_leaves_mistakes_untouched() {
        let mut session = abc();
        assert!(session.mark_incorrect(fixed_now()).is_err());
        assert!(session.mistakes().is_empty());
    }

    #[test]
    fn marking_resets_reveal() {
        let mut session = abc();
        session.reveal();
        session.mark_correct(fixed_now()).unwrap();
        assert!(!session.answer_revealed());
        assert!(session.mark_correct(fixed_now()).is_err());
    }

    #[test]
    fn empty_session_is_complete_immediately() {
        let session = QuizSession::new(
            QuizMode::AskWord,
            SessionOrigin::Fresh,
            Vec::new(),
            fixed_now(),
        );
        assert!(session.is_complete());
        assert_eq!(session.accuracy(), 0.0);
        assert!(session.current_question().is_none());
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn reveal_on_complete_session_is_noop() {
        let mut session = QuizSession::new(
            QuizMode::AskMeaning,
            SessionOrigin::Fresh,
            Vec::new(),
            fixed_now(),
        );
        assert!(!session.reveal());
        assert!(!session.answer_revealed());
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn marking_a_complete_session_fails() {
        let mut session = QuizSession::new(
            QuizMode::AskMeaning,
            SessionOrigin::Fresh,
            vec![record(0, "A")],
            fixed_now(),
        );
        session.reveal();
        session.mark_incorrect(fixed_now()).unwrap();
        let err = session.mark_correct(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidStateTransition {
                state: SessionState::Complete,
                ..
            }
        ));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn review_mistakes_keeps_order_and_resets_counters() {
        let mut session = abc();
        for _ in 0..3 {
            session.reveal();
            session.mark_incorrect(fixed_now()).unwrap();
        }
        let review = session.review_mistakes(fixed_now());
        assert_eq!(review.queue(), session.mistakes());
        assert_eq!(review.position(), 0);
        assert_eq!(review.score(), 0);
        assert!(review.mistakes().is_empty());
        assert_eq!(review.mode(), QuizMode::AskMeaning);
        assert_eq!(review.origin(), SessionOrigin::Review);
    }

    #[test]
    fn duplicate_text_records_remain_distinct() {
        let a = record(0, "same");
        let b = record(1, "same");
        assert_ne!(a, b);
    }
}
