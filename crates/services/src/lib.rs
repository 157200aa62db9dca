#![forbid(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod sessions;

pub use vocab_core::Clock;

pub use config::{DatasetConfig, DatasetLocation, DEFAULT_DATASET_URL};
pub use dataset::{Dataset, DatasetSource, FilterOptions};
pub use error::{DatasetError, SessionError};
pub use sessions::{QuestionView, QuizController, SessionPlanner, SessionProgress};
