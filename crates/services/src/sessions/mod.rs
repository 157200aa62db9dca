mod controller;
mod plan;
mod progress;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::QuizController;
pub use plan::{SessionPlan, SessionPlanner};
pub use progress::SessionProgress;
pub use view::{QuestionView, fields_for};
