use serde::Serialize;

use vocab_core::model::{QuestionField, QuizMode, QuizSession};

/// Presentation-agnostic view of the current question.
///
/// Holds plain values only; the front end decides how to lay them out.
/// `answer` stays `None` until the answer is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based number of this question within the session.
    pub number: usize,
    pub total: usize,
    pub prompt_label: &'static str,
    pub prompt: String,
    pub example: String,
    pub answer_label: &'static str,
    pub answer: Option<String>,
}

impl QuestionView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let (prompt_field, answer_field) = fields_for(session.mode());
        Some(Self {
            number: session.position() + 1,
            total: session.len(),
            prompt_label: prompt_field.column(),
            prompt: question.field(prompt_field).to_string(),
            example: question.example().to_string(),
            answer_label: answer_field.column(),
            answer: session
                .answer_revealed()
                .then(|| question.field(answer_field).to_string()),
        })
    }
}

/// Which column is shown as the prompt and which is the expected answer.
#[must_use]
pub fn fields_for(mode: QuizMode) -> (QuestionField, QuestionField) {
    match mode {
        QuizMode::AskMeaning => (QuestionField::Word, QuestionField::Definition),
        QuizMode::AskWord => (QuestionField::Definition, QuestionField::Word),
    }
}
