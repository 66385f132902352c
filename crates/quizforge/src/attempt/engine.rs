//! Attempt engine — the state machine driving one student through a quiz.
//!
//! All operations are total functions over the [`Attempt`] record: illegal
//! calls (submitting twice, advancing before submitting, ticking a finished
//! attempt) are silent no-ops logged at debug level. The engine is fully
//! synchronous; timing and persistence live in [`super::driver`].

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{AnswerId, AnswerRecord, Question, Quiz, QuizResult, StudentInfo};

use super::types::*;

// ---------------------------------------------------------------------------
// Begin
// ---------------------------------------------------------------------------

/// Start a fresh attempt over a private copy of `quiz`.
///
/// The attempt begins in `CollectingStudentInfo`; nothing is presented and
/// no timer runs until the info form is submitted.
pub fn begin(quiz: Quiz) -> Attempt {
    Attempt {
        quiz,
        state: AttemptState::CollectingStudentInfo,
        student_info: None,
        presented: Vec::new(),
        current_index: 0,
        selected_answer: None,
        submitted_answer: None,
        score: 0,
        remaining_seconds: 0,
        answer_log: Vec::new(),
        result: None,
    }
}

// ---------------------------------------------------------------------------
// Student info
// ---------------------------------------------------------------------------

/// Submit the student's details and enter `InProgress`.
///
/// Name and email are required but carry no format validation; a blank
/// field leaves the attempt in `CollectingStudentInfo` so the caller can
/// re-prompt. On success the presentation order is computed once, the
/// countdown is initialized to the quiz's full time limit, and the first
/// question becomes current.
pub fn submit_student_info(
    attempt: &mut Attempt,
    info: StudentInfo,
    rng: &mut (impl Rng + ?Sized),
) {
    if attempt.state != AttemptState::CollectingStudentInfo {
        debug!(
            "submit_student_info in state {}, ignoring",
            attempt.state.as_tag()
        );
        return;
    }

    if info.name.trim().is_empty() || info.email.trim().is_empty() {
        debug!("submit_student_info with blank name or email, ignoring");
        return;
    }

    attempt.student_info = Some(info);
    enter_in_progress(attempt, rng);

    info!(
        "attempt started: quiz '{}' ({} questions, {}s limit)",
        attempt.quiz.title,
        attempt.presented.len(),
        attempt.remaining_seconds
    );
}

/// Reset the per-run state and (re-)enter `InProgress`.
fn enter_in_progress(attempt: &mut Attempt, rng: &mut (impl Rng + ?Sized)) {
    attempt.presented = compute_presentation(&attempt.quiz, rng);
    attempt.current_index = 0;
    attempt.selected_answer = None;
    attempt.submitted_answer = None;
    attempt.score = 0;
    attempt.remaining_seconds = attempt.quiz.time_limit_seconds();
    attempt.answer_log = Vec::new();
    attempt.result = None;
    attempt.state = AttemptState::InProgress;
}

/// Compute the presentation order for one run of the attempt.
///
/// Question order and per-question answer order are shuffled independently,
/// each only when the corresponding quiz flag is set. Both shuffles are
/// permutations; nothing is added or dropped.
fn compute_presentation(quiz: &Quiz, rng: &mut (impl Rng + ?Sized)) -> Vec<Question> {
    let mut presented = quiz.questions.clone();

    if quiz.randomize_questions {
        presented.shuffle(rng);
    }
    if quiz.randomize_answers {
        for question in &mut presented {
            question.answers.shuffle(rng);
        }
    }

    presented
}

// ---------------------------------------------------------------------------
// Answer selection and submission
// ---------------------------------------------------------------------------

/// Select (or re-select) an answer for the current question.
///
/// Allowed only while `InProgress` and before the current question has been
/// submitted; once submitted the selection is locked. An id that does not
/// belong to the current question is ignored.
pub fn select_answer(attempt: &mut Attempt, answer_id: AnswerId) {
    if attempt.state != AttemptState::InProgress {
        debug!("select_answer in state {}, ignoring", attempt.state.as_tag());
        return;
    }
    if attempt.submitted_answer.is_some() {
        debug!("select_answer after submit, selection locked, ignoring");
        return;
    }

    let Some(question) = attempt.current_question() else {
        debug!("select_answer with no current question, ignoring");
        return;
    };
    if question.answer(&answer_id).is_none() {
        debug!("select_answer: id {answer_id} not on current question, ignoring");
        return;
    }

    attempt.selected_answer = Some(answer_id);
}

/// Submit the currently selected answer.
///
/// Scores the selection against the current question, appends an
/// [`AnswerRecord`], and locks the question. One-shot: with no selection,
/// or once `submitted_answer` is set, this is a no-op.
pub fn submit_answer(attempt: &mut Attempt) {
    if attempt.state != AttemptState::InProgress {
        debug!("submit_answer in state {}, ignoring", attempt.state.as_tag());
        return;
    }
    if attempt.submitted_answer.is_some() {
        debug!("submit_answer: already submitted, ignoring");
        return;
    }
    let Some(selected) = attempt.selected_answer.clone() else {
        debug!("submit_answer with no selection, ignoring");
        return;
    };
    let Some(question) = attempt.current_question() else {
        debug!("submit_answer with no current question, ignoring");
        return;
    };
    let Some(answer) = question.answer(&selected) else {
        debug!("submit_answer: selection not on current question, ignoring");
        return;
    };

    let correct_answer_text = question
        .correct_answer()
        .map(|a| a.text.clone())
        .unwrap_or_default();

    let record = AnswerRecord {
        question_id: question.id.clone(),
        question_text: question.text.clone(),
        answer_id: answer.id.clone(),
        answer_text: answer.text.clone(),
        is_correct: answer.is_correct,
        correct_answer_text,
        explanation: question.explanation.clone(),
    };

    if record.is_correct {
        attempt.score += 1;
    }
    attempt.answer_log.push(record);
    attempt.submitted_answer = Some(selected);
}

/// Advance to the next question, or finish after the last one.
///
/// Allowed only after the current question has been submitted. Advancing
/// clears the selection and submission for the new question.
pub fn next_question(attempt: &mut Attempt) {
    if attempt.state != AttemptState::InProgress {
        debug!("next_question in state {}, ignoring", attempt.state.as_tag());
        return;
    }
    if attempt.submitted_answer.is_none() {
        debug!("next_question before submit, ignoring");
        return;
    }

    if attempt.current_index + 1 < attempt.presented.len() {
        attempt.current_index += 1;
        attempt.selected_answer = None;
        attempt.submitted_answer = None;
    } else {
        enter_finished(attempt);
    }
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// Apply one second of countdown.
///
/// Only meaningful while `InProgress`. Reaching zero forces `Finished`
/// regardless of submission status; an unanswered current question simply
/// has no entry in the answer log.
pub fn tick(attempt: &mut Attempt) {
    if attempt.state != AttemptState::InProgress {
        debug!("tick in state {}, ignoring", attempt.state.as_tag());
        return;
    }

    attempt.remaining_seconds = attempt.remaining_seconds.saturating_sub(1);
    if attempt.remaining_seconds == 0 {
        info!("time expired for quiz '{}'", attempt.quiz.title);
        enter_finished(attempt);
    }
}

// ---------------------------------------------------------------------------
// Finish
// ---------------------------------------------------------------------------

/// Enter the terminal state and derive the `QuizResult` exactly once.
fn enter_finished(attempt: &mut Attempt) {
    let Some(student_info) = attempt.student_info.clone() else {
        debug!("finish with no student info, ignoring");
        return;
    };

    attempt.state = AttemptState::Finished;

    if attempt.result.is_none() {
        attempt.result = Some(QuizResult {
            student_info,
            quiz_id: attempt.quiz.id.clone(),
            quiz_title: attempt.quiz.title.clone(),
            score: attempt.score,
            total_questions: attempt.total_questions(),
            answer_log: attempt.answer_log.clone(),
            timestamp: crate::time::now(),
        });
    }

    info!(
        "attempt finished: quiz '{}', score {}/{}",
        attempt.quiz.title,
        attempt.score,
        attempt.total_questions()
    );
}

// ---------------------------------------------------------------------------
// Restart
// ---------------------------------------------------------------------------

/// Restart a finished attempt with the same student.
///
/// Resets score, log, index, selection and timer, re-randomizes the
/// presentation order, and re-enters `InProgress`. Student info is
/// retained. The restarted run derives its own independent `QuizResult`
/// when it next finishes.
pub fn restart(attempt: &mut Attempt, rng: &mut (impl Rng + ?Sized)) {
    if attempt.state != AttemptState::Finished {
        debug!("restart in state {}, ignoring", attempt.state.as_tag());
        return;
    }

    enter_in_progress(attempt, rng);
    info!("attempt restarted: quiz '{}'", attempt.quiz.title);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
