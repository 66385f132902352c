//! Quizforge — quiz authoring and timed quiz-taking.
//!
//! Provides the quiz data model, the editor that validates and assembles
//! quizzes, the attempt state machine with its countdown-driven async
//! driver, durable quiz and result stores, offline export renderers,
//! and an advisory explanation hook.

pub mod advisory;
pub mod attempt;
pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod storage;
pub mod time;

// Re-export primary types
pub use error::{QuizError, Result};
pub use model::{
    Answer, AnswerId, AnswerRecord, Question, QuestionId, QuestionType, Quiz, QuizId, QuizResult,
    StudentInfo,
};

// Re-export editor types
pub use editor::{FieldError, ValidationReport};

// Re-export attempt types
pub use attempt::{Attempt, AttemptCommand, AttemptDriver, AttemptState};

// Re-export storage types
pub use storage::{
    FileQuizStore, FileResultStore, MemoryResultStore, QuizStore, ResultRecordId, ResultStore,
};

// Re-export advisory types
pub use advisory::{CannedExplanations, ExplanationService};
