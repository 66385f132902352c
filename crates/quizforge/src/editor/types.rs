//! Data structures for editor validation results.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field error
// ---------------------------------------------------------------------------

/// One validation failure, keyed by the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (e.g. "title", "answers").
    pub field: String,
    /// Human-readable message, suitable for display next to the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation report
// ---------------------------------------------------------------------------

/// Outcome of validating one editor record.
///
/// Validation failures block the specific submit action only; they are
/// reported here rather than raised as errors so the caller decides what
/// to do with an invalid draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no field errors were found.
    pub valid: bool,
    /// All failures, in field order.
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Build a report from collected errors; `valid` is derived.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The message recorded for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
