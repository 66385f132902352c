//! Result persistence — append-only log of completed quiz attempts.
//!
//! Each result is stored as a single JSON file named by a zero-padded
//! sequence number (`0000000001.json`, `0000000002.json`, ...) inside
//! the configured base directory. The sequence number orders results by
//! completion; it is never reused, so the history reads oldest first.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "result": { ... QuizResult ... }
//! }
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::model::QuizResult;

use super::ResultStore;

// ── File format constants ─────────────────────────────────────────────────────

const RESULT_FILE_VERSION: u32 = 1;

// ── Record id ─────────────────────────────────────────────────────────────────

/// Sequence number assigned to a stored result.
///
/// Ids start at 1 and increase monotonically within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResultRecordId(pub u64);

impl std::fmt::Display for ResultRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Wrapper written to disk for each result.
#[derive(Debug, Serialize, Deserialize)]
struct ResultFile {
    /// Format version number.
    version: u32,
    /// The stored result record.
    result: QuizResult,
}

// ── FileResultStore ───────────────────────────────────────────────────────────

/// Filesystem-backed append-only store for `QuizResult` records.
pub struct FileResultStore {
    base_dir: PathBuf,
}

impl FileResultStore {
    /// Create a new `FileResultStore` rooted at `base_dir`.
    ///
    /// The directory and any missing parents are created if they do not
    /// exist.
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

    /// Build the filesystem path for a sequence number.
    fn result_path(&self, id: ResultRecordId) -> PathBuf {
        self.base_dir.join(format!("{:010}.json", id.0))
    }

    /// Collect the sequence numbers present in the store directory,
    /// in ascending order. Files whose names are not sequence numbers
    /// are ignored.
    fn sequence_numbers(&self) -> Result<Vec<u64>> {
        let mut numbers = Vec::new();

        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(stem) = name.strip_suffix(".json") else {
                continue;
            };
            if let Ok(n) = stem.parse::<u64>() {
                numbers.push(n);
            }
        }

        numbers.sort_unstable();
        Ok(numbers)
    }

    /// Parse one result file, rejecting unknown format versions.
    fn parse(path: &std::path::Path, bytes: &[u8]) -> Result<QuizResult> {
        let file: ResultFile = serde_json::from_slice(bytes).map_err(|e| {
            QuizError::InvalidFileFormat(format!(
                "failed to parse result file {}: {e}",
                path.display()
            ))
        })?;

        if file.version != RESULT_FILE_VERSION {
            return Err(QuizError::InvalidFileFormat(format!(
                "unsupported result file version {} in {} (expected {})",
                file.version,
                path.display(),
                RESULT_FILE_VERSION
            )));
        }

        Ok(file.result)
    }
}

impl ResultStore for FileResultStore {
    fn append(&self, result: &QuizResult) -> Result<ResultRecordId> {
        let next = self.sequence_numbers()?.last().copied().unwrap_or(0) + 1;
        let id = ResultRecordId(next);

        let file = ResultFile {
            version: RESULT_FILE_VERSION,
            result: result.clone(),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| QuizError::SerializationError(e.to_string()))?;

        std::fs::write(self.result_path(id), json.as_bytes()).map_err(|e| {
            QuizError::Persistence(format!("failed to commit result record {id}: {e}"))
        })?;
        Ok(id)
    }

    /// Reading skips unreadable files with a warning; one corrupt record
    /// never hides the rest of the history.
    fn list_all(&self) -> Result<Vec<QuizResult>> {
        let mut results = Vec::new();

        for n in self.sequence_numbers()? {
            let path = self.result_path(ResultRecordId(n));
            let bytes = std::fs::read(&path)?;
            match Self::parse(&path, &bytes) {
                Ok(result) => results.push(result),
                Err(e) => warn!("skipping unreadable result file: {e}"),
            }
        }

        Ok(results)
    }
}

// ── MemoryResultStore ─────────────────────────────────────────────────────────

/// In-memory `ResultStore` used in tests and by callers that do not
/// need results to outlive the process.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: Mutex<Vec<QuizResult>>,
}

impl MemoryResultStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the inner list, recovering from a poisoned lock.
    ///
    /// Stored results are plain data; a panic in another holder cannot
    /// leave them in a torn state, so the poison flag carries no
    /// information here.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<QuizResult>> {
        match self.results.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ResultStore for MemoryResultStore {
    fn append(&self, result: &QuizResult) -> Result<ResultRecordId> {
        let mut results = self.lock();
        results.push(result.clone());
        Ok(ResultRecordId(results.len() as u64))
    }

    fn list_all(&self) -> Result<Vec<QuizResult>> {
        Ok(self.lock().clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
