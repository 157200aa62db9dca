use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::QuestionRecord;
use crate::model::session::{QuizMode, QuizSession, SessionOrigin};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("session is not complete ({answered} of {total} answered)")]
    NotComplete { answered: usize, total: usize },

    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Result of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    mode: QuizMode,
    origin: SessionOrigin,
    total: usize,
    correct: usize,
    incorrect: usize,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    mistakes: Vec<QuestionRecord>,
}

impl QuizSummary {
    /// Build a summary from a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NotComplete` if questions remain unanswered.
    /// Returns `SummaryError::InvalidTimeRange` if the timestamps are out of order.
    pub fn from_session(session: &QuizSession) -> Result<Self, SummaryError> {
        let Some(completed_at) = session.completed_at() else {
            return Err(SummaryError::NotComplete {
                answered: session.position(),
                total: session.len(),
            });
        };
        if completed_at < session.started_at() {
            return Err(SummaryError::InvalidTimeRange);
        }

        Ok(Self {
            mode: session.mode(),
            origin: session.origin(),
            total: session.len(),
            correct: session.score(),
            incorrect: session.mistakes().len(),
            started_at: session.started_at(),
            completed_at,
            mistakes: session.mistakes().to_vec(),
        })
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
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn mistakes(&self) -> &[QuestionRecord] {
        &self.mistakes
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy() * 100.0
    }
}
