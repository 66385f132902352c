//! Advisory explanation lookup.
//!
//! Given a question and its correct answer, an [`ExplanationService`]
//! produces a short natural-language explanation. The output is purely
//! informational: nothing in scoring, state transitions, or persistence
//! waits on it or reads it back, and a failed lookup is simply dropped by
//! callers.
//!
//! The library ships the prompt builder and a canned offline
//! implementation; network-backed services implement the trait outside
//! this crate.

use std::future::Future;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Service contract
// ---------------------------------------------------------------------------

/// Source of short explanations for question/answer pairs.
pub trait ExplanationService {
    /// Produce a brief explanation of why `correct_answer_text` answers
    /// `question_text`.
    ///
    /// # Errors
    ///
    /// Implementations may fail for any reason (network, quota, ...);
    /// callers treat a failure as "no explanation available".
    fn explain(
        &self,
        question_text: &str,
        correct_answer_text: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Build the request text sent to an explanation backend.
pub fn build_explanation_prompt(question_text: &str, correct_answer_text: &str) -> String {
    format!(
        "Question: {question_text}\nCorrect Answer: {correct_answer_text}\nPlease provide a brief explanation in 1-2 lines."
    )
}

// ---------------------------------------------------------------------------
// Offline implementation
// ---------------------------------------------------------------------------

/// Offline `ExplanationService` that templates a one-line answer from its
/// inputs. The default when no network-backed service is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedExplanations;

impl ExplanationService for CannedExplanations {
    async fn explain(&self, question_text: &str, correct_answer_text: &str) -> Result<String> {
        Ok(format!(
            "For \"{question_text}\" the correct answer is \"{correct_answer_text}\"."
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
