//! Error types for Quizforge.
//!
//! All errors are strongly typed and propagated without panicking.
//! Editor validation is reported through `ValidationReport`, not through
//! this enum; only a rejected finalize surfaces as an error here.

/// Quiz error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Quiz has no questions: at least one question is required")]
    EmptyQuiz,

    #[error("Quiz not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, QuizError>;
