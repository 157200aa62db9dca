use serde::Serialize;

use vocab_core::model::QuizSession;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let total = session.len();
        let answered = session.position();
        Self {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            correct: session.score(),
            incorrect: session.mistakes().len(),
            is_complete: session.is_complete(),
        }
    }

    /// Share of the queue already answered, `0.0` for an empty queue.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}
