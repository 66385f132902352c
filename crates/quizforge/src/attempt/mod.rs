//! Quiz attempt — the state machine that takes a student through a quiz.
//!
//! The attempt module provides:
//! - The `CollectingStudentInfo -> InProgress -> Finished` lifecycle
//! - Per-attempt randomized presentation order with a seedable RNG hook
//! - One-shot answer submission with scoring and an append-only log
//! - A one-second countdown that forces the finish on expiry
//! - Restart with retained student info and independent results
//! - An async driver owning the timer, command queue, and persistence
//!   hand-off
//!
//! The engine in [`engine`] is pure and synchronous; everything timed or
//! durable lives in [`driver`].

pub mod driver;
pub mod engine;
pub mod types;

pub use types::{Attempt, AttemptState};

pub use driver::{AttemptCommand, AttemptDriver};

pub use engine::{
    begin, next_question, restart, select_answer, submit_answer, submit_student_info, tick,
};
