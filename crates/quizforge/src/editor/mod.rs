//! Quiz editor — building and validating a quiz before it enters the store.
//!
//! The editor module provides:
//! - Field-level validation for quiz info, questions, and answers
//! - Question upsert with fresh-id assignment on append
//! - Answer upsert with single-correct enforcement
//! - Positional removal matching on-screen ordering
//! - Question type switching with the fixed true/false answer pair
//! - Finalization before persistence
//!
//! All operations are plain transformations over the draft `Quiz` and
//! `Question` records; nothing here touches a store.

pub mod engine;
pub mod types;

pub use types::{FieldError, ValidationReport};

pub use engine::{
    finalize_quiz, remove_answer, remove_question, set_exclusive_correct_answer,
    set_question_type, upsert_answer, upsert_question, validate_answer, validate_question,
    validate_quiz_info,
};
