mod filter;
mod ids;
mod question;
mod session;
mod summary;

pub use ids::RecordIndex;

pub use filter::{Criterion, FilterCriteria, SampleSize, SampleSizeError};
pub use question::{Importance, QuestionDraft, QuestionField, QuestionRecord, RecordError};
pub use session::{
    QuizError, QuizMode, QuizSession, SessionAction, SessionOrigin, SessionState,
};
pub use summary::{QuizSummary, SummaryError};
