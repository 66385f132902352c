//! Editor engine — validation, question/answer upserts, finalization.

use log::debug;

use crate::error::{QuizError, Result};
use crate::model::{Answer, AnswerId, Question, QuestionId, QuestionType, Quiz};

use super::types::*;

/// Answer-count bounds for a saved question.
const MIN_ANSWERS: usize = 2;
const MAX_ANSWERS: usize = 5;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate quiz-level fields: title and time limit.
pub fn validate_quiz_info(quiz: &Quiz) -> ValidationReport {
    let mut errors = Vec::new();

    if quiz.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Quiz title is required."));
    }

    if quiz.time_limit_minutes == 0 {
        errors.push(FieldError::new(
            "time_limit_minutes",
            "Time limit must be greater than 0.",
        ));
    }

    ValidationReport::from_errors(errors)
}

/// Validate a question: text, answer-count bounds, and at least one
/// correct answer.
pub fn validate_question(question: &Question) -> ValidationReport {
    let mut errors = Vec::new();

    if question.text.trim().is_empty() {
        errors.push(FieldError::new("text", "Question text is required."));
    }

    let count = question.answers.len();
    if count < MIN_ANSWERS || count > MAX_ANSWERS {
        errors.push(FieldError::new(
            "answers",
            "A question must have between 2 and 5 answers.",
        ));
    } else if !question.answers.iter().any(|a| a.is_correct) {
        errors.push(FieldError::new(
            "answers",
            "At least one answer must be correct.",
        ));
    }

    ValidationReport::from_errors(errors)
}

/// Validate a single answer: text must be non-empty.
pub fn validate_answer(answer: &Answer) -> ValidationReport {
    let mut errors = Vec::new();

    if answer.text.trim().is_empty() {
        errors.push(FieldError::new("text", "Answer text is required."));
    }

    ValidationReport::from_errors(errors)
}

// ---------------------------------------------------------------------------
// Question upsert
// ---------------------------------------------------------------------------

/// Insert or replace a question on the quiz.
///
/// With `editing_id` the question at that id is replaced in place, keeping
/// its position and id. Without it the question is appended with a freshly
/// assigned id, and every answer also receives a fresh id so draft ids
/// never collide across edits.
///
/// An `editing_id` that matches no stored question is a no-op.
pub fn upsert_question(quiz: &mut Quiz, mut question: Question, editing_id: Option<&QuestionId>) {
    match editing_id {
        Some(id) => {
            let Some(slot) = quiz.questions.iter_mut().find(|q| &q.id == id) else {
                debug!("upsert_question: no question with id {id}, ignoring");
                return;
            };
            question.id = id.clone();
            *slot = question;
        }
        None => {
            question.id = QuestionId::generate();
            for answer in &mut question.answers {
                answer.id = AnswerId::generate();
            }
            quiz.questions.push(question);
        }
    }
}

/// Positionally remove a question. An out-of-range index is a no-op.
pub fn remove_question(quiz: &mut Quiz, index: usize) {
    if index >= quiz.questions.len() {
        debug!("remove_question: index {index} out of range, ignoring");
        return;
    }
    quiz.questions.remove(index);
}

// ---------------------------------------------------------------------------
// Answer operations
// ---------------------------------------------------------------------------

/// Insert or replace an answer on the question.
///
/// With `editing_id` the matching answer is replaced in place (id and
/// position preserved); without it the answer is appended with a fresh id.
/// If the incoming answer is marked correct, every other answer on the
/// question is cleared to incorrect.
///
/// Appends past the answer-count cap and unknown editing ids are no-ops.
pub fn upsert_answer(question: &mut Question, mut answer: Answer, editing_id: Option<&AnswerId>) {
    match editing_id {
        Some(id) => {
            if !question.answers.iter().any(|a| &a.id == id) {
                debug!("upsert_answer: no answer with id {id}, ignoring");
                return;
            }
            if answer.is_correct {
                for other in &mut question.answers {
                    other.is_correct = false;
                }
            }
            if let Some(slot) = question.answers.iter_mut().find(|a| &a.id == id) {
                answer.id = id.clone();
                *slot = answer;
            }
        }
        None => {
            if question.answers.len() >= MAX_ANSWERS {
                debug!("upsert_answer: question already has {MAX_ANSWERS} answers, ignoring");
                return;
            }
            if answer.is_correct {
                for other in &mut question.answers {
                    other.is_correct = false;
                }
            }
            answer.id = AnswerId::generate();
            question.answers.push(answer);
        }
    }
}

/// Mark exactly one answer correct, clearing the flag on all others.
///
/// An id that matches no answer leaves the question untouched, so the
/// single-correct invariant is never broken by a stale id.
pub fn set_exclusive_correct_answer(question: &mut Question, answer_id: &AnswerId) {
    if !question.answers.iter().any(|a| &a.id == answer_id) {
        debug!("set_exclusive_correct_answer: no answer with id {answer_id}, ignoring");
        return;
    }
    for answer in &mut question.answers {
        answer.is_correct = &answer.id == answer_id;
    }
}

/// Positionally remove an answer. An out-of-range index is a no-op.
pub fn remove_answer(question: &mut Question, index: usize) {
    if index >= question.answers.len() {
        debug!("remove_answer: index {index} out of range, ignoring");
        return;
    }
    question.answers.remove(index);
}

// ---------------------------------------------------------------------------
// Question type switch
// ---------------------------------------------------------------------------

/// Set the question type, applying the answer-replacement rule.
///
/// Switching to true/false installs the fixed True/False pair with fresh
/// ids (both initially incorrect); switching to multiple choice clears the
/// answers entirely. Applying the current type again re-applies the rule.
pub fn set_question_type(question: &mut Question, question_type: QuestionType) {
    question.question_type = question_type;
    question.answers = match question_type {
        QuestionType::TrueFalse => Question::true_false_answers(),
        QuestionType::MultipleChoice => Vec::new(),
    };
}

// ---------------------------------------------------------------------------
// Finalization
// ---------------------------------------------------------------------------

/// Check that a quiz is ready to persist and take.
///
/// Requires valid quiz info (non-empty title, positive time limit) and at
/// least one question. Per-question invariants are enforced on the question
/// save path, not re-checked here.
///
/// # Errors
///
/// Returns `QuizError::Validation` for a failing quiz-info field, or
/// `QuizError::EmptyQuiz` when the quiz has no questions.
pub fn finalize_quiz(quiz: Quiz) -> Result<Quiz> {
    let info = validate_quiz_info(&quiz);
    if let Some(first) = info.errors.into_iter().next() {
        return Err(QuizError::Validation {
            field: first.field,
            message: first.message,
        });
    }

    if quiz.questions.is_empty() {
        return Err(QuizError::EmptyQuiz);
    }

    Ok(quiz)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
