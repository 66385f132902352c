//! Data structures for a quiz attempt.

use crate::model::{AnswerId, AnswerRecord, Question, Quiz, QuizResult, StudentInfo};

// ---------------------------------------------------------------------------
// Attempt state
// ---------------------------------------------------------------------------

/// Lifecycle state of an attempt.
///
/// The only transitions are `CollectingStudentInfo -> InProgress ->
/// Finished`, plus an explicit restart from `Finished` back to
/// `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Waiting for the student's name and email.
    CollectingStudentInfo,
    /// The countdown is running and questions are being presented.
    InProgress,
    /// Terminal. A `QuizResult` has been derived.
    Finished,
}

impl AttemptState {
    /// Return a stable string tag.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::CollectingStudentInfo => "collecting_student_info",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

// ---------------------------------------------------------------------------
// Attempt
// ---------------------------------------------------------------------------

/// One student's pass through a quiz.
///
/// The attempt owns a private copy of the quiz taken at start, so edits to
/// the stored quiz never affect an attempt already underway. All mutation
/// goes through the operations in [`super::engine`]; the record is runtime
/// state only and is never persisted itself.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// Private copy of the quiz being taken.
    pub quiz: Quiz,
    pub state: AttemptState,
    /// Present once the info form has been submitted.
    pub student_info: Option<StudentInfo>,
    /// Presentation order for this attempt, fixed on entry into
    /// `InProgress` (re-randomized on restart).
    pub presented: Vec<Question>,
    pub current_index: usize,
    /// The student's current (not yet submitted) choice.
    pub selected_answer: Option<AnswerId>,
    /// Set once the current question has been submitted; locks selection.
    pub submitted_answer: Option<AnswerId>,
    pub score: u32,
    pub remaining_seconds: u32,
    /// One record per submitted question, in presentation order.
    pub answer_log: Vec<AnswerRecord>,
    /// Derived exactly once on entering `Finished`; cleared by a restart.
    pub result: Option<QuizResult>,
}

impl Attempt {
    /// The question currently presented, if the attempt is past the info
    /// form and questions remain.
    pub fn current_question(&self) -> Option<&Question> {
        self.presented.get(self.current_index)
    }

    /// Total number of questions in this attempt.
    pub fn total_questions(&self) -> u32 {
        self.quiz.questions.len() as u32
    }

    /// Progress through the attempt as `(current_index + 1) / total`,
    /// clamped to 0.0 for an empty quiz.
    pub fn progress(&self) -> f32 {
        let total = self.presented.len();
        if total == 0 {
            return 0.0;
        }
        (self.current_index + 1) as f32 / total as f32
    }

    /// True once the current question has been submitted.
    pub fn current_submitted(&self) -> bool {
        self.submitted_answer.is_some()
    }
}
