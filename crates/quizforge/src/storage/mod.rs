//! Storage layer for quiz documents and finished-attempt results.
//!
//! Both collections are directory-backed, one pretty-printed JSON file per
//! record, wrapped in a versioned envelope. Store opens are lazy and
//! idempotent; the first use creates the directory.
//!
//! # Directory layout
//!
//! By convention the default root is `~/.quizforge/`, with sub-directories
//! created by each store:
//!
//! ```text
//! ~/.quizforge/
//! ├── quizzes/
//! │   └── {quiz_id}.json
//! └── results/
//!     └── 0000000001.json
//! ```
//!
//! # Modules
//!
//! - [`quiz_store`] — CRUD for `Quiz` documents keyed by id.
//! - [`result_store`] — append-only `QuizResult` records with
//!   store-assigned numeric ids, plus an in-memory fake.

pub mod quiz_store;
pub mod result_store;

use crate::error::{QuizError, Result};
use crate::model::{Quiz, QuizId, QuizResult};

pub use quiz_store::FileQuizStore;
pub use result_store::{FileResultStore, MemoryResultStore, ResultRecordId};

// ---------------------------------------------------------------------------
// Store contracts
// ---------------------------------------------------------------------------

/// Contract for the durable quiz collection.
///
/// One record per quiz, primary key = id, values the full nested quiz
/// document. Callers inject an implementation; the attempt and editor
/// layers never reach for a concrete store themselves.
pub trait QuizStore {
    /// All stored quizzes, in an order stable enough to display.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Io` if the underlying collection cannot be read.
    fn list(&self) -> Result<Vec<Quiz>>;

    /// Load one quiz, or `None` if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidFileFormat` for an unreadable record, or
    /// `QuizError::Io` for other failures.
    fn get(&self, id: &QuizId) -> Result<Option<Quiz>>;

    /// Insert or overwrite a quiz under its id.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SerializationError` or `QuizError::Io` when the
    /// write fails.
    fn put(&self, quiz: &Quiz) -> Result<()>;

    /// Delete a quiz by id. A missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Io` for failures other than "not found".
    fn delete(&self, id: &QuizId) -> Result<()>;

    /// Load a quiz that must exist, as when starting an attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFound` when the id is absent, making a
    /// missing quiz fatal to the attempt being started.
    fn get_required(&self, id: &QuizId) -> Result<Quiz> {
        self.get(id)?
            .ok_or_else(|| QuizError::NotFound(format!("quiz not found: {id}")))
    }
}

/// Contract for the append-only result collection.
///
/// Record identity is assigned by the store on insert; records are never
/// updated or deleted through this interface.
pub trait ResultStore {
    /// Durably append one finished-attempt record and return its
    /// store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Persistence`, `QuizError::SerializationError`,
    /// or `QuizError::Io` when the record cannot be committed.
    fn append(&self, result: &QuizResult) -> Result<ResultRecordId>;

    /// All stored results, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Io` if the underlying collection cannot be read.
    fn list_all(&self) -> Result<Vec<QuizResult>>;
}
