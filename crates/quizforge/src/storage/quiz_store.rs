//! Quiz persistence — store and retrieve `Quiz` documents.
//!
//! Each quiz is stored as a single JSON file named `{quiz_id}.json`
//! inside the configured base directory.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "quiz": { ... Quiz ... }
//! }
//! ```

use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::model::{Quiz, QuizId};

use super::QuizStore;

// ── File format constants ─────────────────────────────────────────────────────

const QUIZ_FILE_VERSION: u32 = 1;

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Wrapper written to disk for each quiz.
#[derive(Debug, Serialize, Deserialize)]
struct QuizFile {
    /// Format version number.
    version: u32,
    /// The stored quiz document.
    quiz: Quiz,
}

// ── FileQuizStore ─────────────────────────────────────────────────────────────

/// Filesystem-backed store for `Quiz` documents.
///
/// Each quiz is written to a dedicated JSON file named by its id. The
/// store is safe for single-process use; concurrent writes from multiple
/// processes are not coordinated.
pub struct FileQuizStore {
    base_dir: PathBuf,
}

impl FileQuizStore {
    /// Create a new `FileQuizStore` rooted at `base_dir`.
    ///
    /// The directory and any missing parents are created if they do not
    /// exist; opening an existing directory is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Build the filesystem path for a quiz id.
    fn quiz_path(&self, id: &QuizId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id.0))
    }

    /// Parse one quiz file, rejecting unknown format versions.
    fn parse(path: &std::path::Path, bytes: &[u8]) -> Result<Quiz> {
        let file: QuizFile = serde_json::from_slice(bytes).map_err(|e| {
            QuizError::InvalidFileFormat(format!(
                "failed to parse quiz file {}: {e}",
                path.display()
            ))
        })?;

        if file.version != QUIZ_FILE_VERSION {
            return Err(QuizError::InvalidFileFormat(format!(
                "unsupported quiz file version {} in {} (expected {})",
                file.version,
                path.display(),
                QUIZ_FILE_VERSION
            )));
        }

        Ok(file.quiz)
    }
}

impl QuizStore for FileQuizStore {
    /// Listing skips unreadable files with a warning rather than failing
    /// the whole call; one corrupt record never hides the rest.
    fn list(&self) -> Result<Vec<Quiz>> {
        let mut quizzes = Vec::new();

        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            if !name.to_string_lossy().ends_with(".json") {
                continue;
            }

            let bytes = std::fs::read(&path)?;
            match Self::parse(&path, &bytes) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => warn!("skipping unreadable quiz file: {e}"),
            }
        }

        quizzes.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.0.cmp(&b.id.0)));
        Ok(quizzes)
    }

    fn get(&self, id: &QuizId) -> Result<Option<Quiz>> {
        let path = self.quiz_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        Self::parse(&path, &bytes).map(Some)
    }

    fn put(&self, quiz: &Quiz) -> Result<()> {
        let file = QuizFile {
            version: QUIZ_FILE_VERSION,
            quiz: quiz.clone(),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| QuizError::SerializationError(e.to_string()))?;

        let path = self.quiz_path(&quiz.id);
        std::fs::write(&path, json.as_bytes())?;

        Ok(())
    }

    fn delete(&self, id: &QuizId) -> Result<()> {
        let path = self.quiz_path(id);

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(QuizError::Io(e)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
