use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use vocab_core::Clock;
use vocab_core::model::{
    FilterCriteria, QuestionRecord, QuizError, QuizMode, QuizSession, QuizSummary, SessionAction,
    SessionOrigin, SessionState,
};

use super::plan::SessionPlanner;
use super::progress::SessionProgress;
use super::view::QuestionView;
use crate::dataset::Dataset;
use crate::error::SessionError;

/// Drives one user's quiz over a loaded dataset.
///
/// Owns at most one `QuizSession`. The queue of a session is frozen when it
/// starts; changing criteria means calling `start` again.
pub struct QuizController {
    dataset: Dataset,
    clock: Clock,
    rng: StdRng,
    criteria: Option<FilterCriteria>,
    session: Option<QuizSession>,
}

impl QuizController {
    #[must_use]
    pub fn new(dataset: Dataset, clock: Clock) -> Self {
        Self {
            dataset,
            clock,
            rng: StdRng::from_rng(&mut rand::rng()),
            criteria: None,
            session: None,
        }
    }

    /// Use a seeded random source so question order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Criteria of the session in progress, if one was started from the dataset.
    #[must_use]
    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::NotStarted, QuizSession::state)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.session.as_ref()?.current_question()
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session.as_ref().map(SessionProgress::from_session)
    }

    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView> {
        QuestionView::from_session(self.session.as_ref()?)
    }

    /// Start a new session, replacing any session in progress.
    ///
    /// Zero matching records is not an error: the session is complete at once.
    pub fn start(&mut self, criteria: FilterCriteria, mode: QuizMode) -> &QuizSession {
        let plan = SessionPlanner::new(&criteria).build(self.dataset.records(), &mut self.rng);
        info!(
            %mode,
            matched = plan.matched,
            selected = plan.total(),
            sample = %criteria.sample_size,
            "quiz started"
        );
        let session = QuizSession::new(mode, SessionOrigin::Fresh, plan.questions, self.clock.now());
        self.criteria = Some(criteria);
        self.session.insert(session)
    }

    /// Reveal the answer to the current question.
    ///
    /// Returns `Ok(false)` and changes nothing when the session is complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if no session has been started.
    pub fn reveal(&mut self) -> Result<bool, SessionError> {
        let session = self.active_mut(SessionAction::Reveal)?;
        let revealed = session.reveal();
        debug!(position = session.position(), revealed, "reveal");
        Ok(revealed)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if no session is running, the answer has
    /// not been revealed, or the session is already complete.
    pub fn mark_correct(&mut self) -> Result<SessionProgress, SessionError> {
        let now = self.clock.now();
        let session = self.active_mut(SessionAction::MarkCorrect)?;
        session.mark_correct(now).inspect_err(log_rejected)?;
        debug!(position = session.position(), score = session.score(), "marked correct");
        Ok(Self::after_mark(session))
    }

    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if no session is running, the answer has
    /// not been revealed, or the session is already complete.
    pub fn mark_incorrect(&mut self) -> Result<SessionProgress, SessionError> {
        let now = self.clock.now();
        let session = self.active_mut(SessionAction::MarkIncorrect)?;
        session.mark_incorrect(now).inspect_err(log_rejected)?;
        debug!(
            position = session.position(),
            mistakes = session.mistakes().len(),
            "marked incorrect"
        );
        Ok(Self::after_mark(session))
    }

    /// Drop the current session and criteria. `start` must be called again.
    pub fn restart(&mut self) {
        if self.session.take().is_some() {
            info!("quiz restarted");
        }
        self.criteria = None;
    }

    /// Replace the current session with one over its mistakes, in the order made.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if no session has been started.
    pub fn review_mistakes(&mut self) -> Result<&QuizSession, SessionError> {
        let now = self.clock.now();
        let review = self
            .active_mut(SessionAction::ReviewMistakes)?
            .review_mistakes(now);
        info!(questions = review.len(), "reviewing mistakes");
        Ok(self.session.insert(review))
    }

    /// Summary of the finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if no session has been started, and
    /// `SessionError::Summary` if the session is still running.
    pub fn summary(&self) -> Result<QuizSummary, SessionError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| not_started(SessionAction::Summarize))?;
        Ok(QuizSummary::from_session(session)?)
    }

    fn active_mut(&mut self, action: SessionAction) -> Result<&mut QuizSession, SessionError> {
        self.session.as_mut().ok_or_else(|| {
            warn!(%action, "no quiz in progress");
            not_started(action)
        })
    }

    fn after_mark(session: &QuizSession) -> SessionProgress {
        let progress = SessionProgress::from_session(session);
        if progress.is_complete {
            info!(
                score = session.score(),
                total = session.len(),
                accuracy = session.accuracy(),
                "quiz complete"
            );
        }
        progress
    }
}

fn not_started(action: SessionAction) -> SessionError {
    SessionError::Quiz(QuizError::InvalidStateTransition {
        action,
        state: SessionState::NotStarted,
    })
}

fn log_rejected(err: &QuizError) {
    warn!(%err, "transition rejected");
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("dataset_len", &self.dataset.len())
            .field("criteria", &self.criteria)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
