//! Integration test: countdown and expiry behavior.
//!
//! Drives the attempt driver on tokio's paused clock and pins down the
//! timing semantics: the countdown only runs while a quiz is in progress,
//! it ticks once per second, expiry forces the finish with whatever was
//! logged so far, and an answer landing on the final second still counts.

use std::sync::Arc;
use std::time::Duration;

use quizforge::attempt::{AttemptCommand, AttemptDriver, AttemptState};
use quizforge::model::{Answer, Question, Quiz, StudentInfo};
use quizforge::storage::{MemoryResultStore, ResultStore};
use tokio::time::advance;

fn make_quiz() -> Quiz {
    let mut quiz = Quiz::new("Timed quiz");
    quiz.time_limit_minutes = 1;
    quiz.randomize_questions = false;
    quiz.randomize_answers = false;

    let mut q1 = Question::new("First?");
    q1.answers = vec![Answer::correct("yes"), Answer::new("no")];
    let mut q2 = Question::new("Second?");
    q2.answers = vec![Answer::correct("yes"), Answer::new("no")];
    quiz.questions = vec![q1, q2];
    quiz
}

fn student() -> StudentInfo {
    StudentInfo::new("Grace Hopper", "grace@example.com")
}

/// Let the driver work through ready ticks and the persistence task.
async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

async fn answer_current(driver: &AttemptDriver, correctly: bool) {
    let snapshot = driver.snapshot();
    let question = snapshot
        .current_question()
        .expect("a question should be current");
    let id = question
        .answers
        .iter()
        .find(|a| a.is_correct == correctly)
        .expect("the question should offer both kinds of answer")
        .id
        .clone();
    driver.apply(AttemptCommand::SelectAnswer(id)).await;
    driver.apply(AttemptCommand::SubmitAnswer).await;
    driver.apply(AttemptCommand::NextQuestion).await;
}

#[tokio::test(start_paused = true)]
async fn expiry_finishes_with_partial_log() {
    let store = Arc::new(MemoryResultStore::new());
    let driver = AttemptDriver::spawn(make_quiz(), store.clone());

    driver
        .apply(AttemptCommand::SubmitStudentInfo(student()))
        .await;
    answer_current(&driver, true).await;

    // The second question is on screen when the clock runs out.
    advance(Duration::from_secs(60)).await;
    settle().await;

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.state, AttemptState::Finished);
    assert_eq!(snapshot.remaining_seconds, 0);
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.answer_log.len(), 1, "only the answered question is logged");

    let stored = store.list_all().expect("history should list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].score, 1);
    assert_eq!(stored[0].total_questions, 2);
    assert_eq!(stored[0].answer_log.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn expiry_with_no_answers_records_zero() {
    let store = Arc::new(MemoryResultStore::new());
    let driver = AttemptDriver::spawn(make_quiz(), store.clone());

    driver
        .apply(AttemptCommand::SubmitStudentInfo(student()))
        .await;
    advance(Duration::from_secs(60)).await;
    settle().await;

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.state, AttemptState::Finished);
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.answer_log.is_empty());

    let stored = store.list_all().expect("history should list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].score, 0);
    assert!(stored[0].answer_log.is_empty());
    assert_eq!(stored[0].student_info.name, "Grace Hopper");
}

#[tokio::test(start_paused = true)]
async fn countdown_ticks_once_per_second() {
    let store = Arc::new(MemoryResultStore::new());
    let mut driver = AttemptDriver::spawn(make_quiz(), store);

    let started = driver
        .apply(AttemptCommand::SubmitStudentInfo(student()))
        .await;
    assert_eq!(started.remaining_seconds, 60);

    // With the clock paused, each wait resumes exactly at the next tick.
    for expected in (55..60).rev() {
        let snapshot = driver.updated().await;
        assert_eq!(snapshot.state, AttemptState::InProgress);
        assert_eq!(snapshot.remaining_seconds, expected);
    }
}

#[tokio::test(start_paused = true)]
async fn countdown_waits_for_student_info_and_stops_at_finish() {
    let store = Arc::new(MemoryResultStore::new());
    let driver = AttemptDriver::spawn(make_quiz(), store.clone());

    // Time spent on the info form does not come out of the limit.
    advance(Duration::from_secs(30)).await;
    settle().await;
    let waiting = driver.snapshot();
    assert_eq!(waiting.state, AttemptState::CollectingStudentInfo);
    assert_eq!(waiting.remaining_seconds, 0);

    let started = driver
        .apply(AttemptCommand::SubmitStudentInfo(student()))
        .await;
    assert_eq!(started.remaining_seconds, 60, "the full limit is available");

    answer_current(&driver, true).await;
    answer_current(&driver, true).await;
    let finished = driver.snapshot();
    assert_eq!(finished.state, AttemptState::Finished);

    // A finished attempt no longer consumes the clock.
    advance(Duration::from_secs(120)).await;
    settle().await;
    let after = driver.snapshot();
    assert_eq!(after.state, AttemptState::Finished);
    assert_eq!(after.remaining_seconds, finished.remaining_seconds);

    let stored = store.list_all().expect("history should list");
    assert_eq!(stored.len(), 1, "a finished run persists exactly once");
}

#[tokio::test(start_paused = true)]
async fn final_second_submit_still_counts() {
    let store = Arc::new(MemoryResultStore::new());
    let driver = AttemptDriver::spawn(make_quiz(), store.clone());

    driver
        .apply(AttemptCommand::SubmitStudentInfo(student()))
        .await;

    advance(Duration::from_secs(59)).await;
    settle().await;
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.state, AttemptState::InProgress);
    assert_eq!(snapshot.remaining_seconds, 1);

    // Answer during the last second, then let the clock run out.
    let question = snapshot
        .current_question()
        .expect("a question should be current");
    let correct = question
        .answers
        .iter()
        .find(|a| a.is_correct)
        .expect("the question should have a correct answer")
        .id
        .clone();
    driver.apply(AttemptCommand::SelectAnswer(correct)).await;
    driver.apply(AttemptCommand::SubmitAnswer).await;

    advance(Duration::from_secs(1)).await;
    settle().await;

    let finished = driver.snapshot();
    assert_eq!(finished.state, AttemptState::Finished);
    assert_eq!(finished.remaining_seconds, 0);
    assert_eq!(finished.score, 1, "the last-second submit is scored");
    assert_eq!(finished.answer_log.len(), 1);

    let stored = store.list_all().expect("history should list");
    assert_eq!(stored[0].score, 1);
}

#[tokio::test(start_paused = true)]
async fn restart_after_expiry_restarts_the_clock() {
    let store = Arc::new(MemoryResultStore::new());
    let driver = AttemptDriver::spawn(make_quiz(), store.clone());

    driver
        .apply(AttemptCommand::SubmitStudentInfo(student()))
        .await;
    advance(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(driver.snapshot().state, AttemptState::Finished);

    let restarted = driver.apply(AttemptCommand::Restart).await;
    assert_eq!(restarted.state, AttemptState::InProgress);
    assert_eq!(restarted.remaining_seconds, 60, "restart grants a fresh clock");

    // The second run times out on its own schedule and persists again.
    advance(Duration::from_secs(60)).await;
    settle().await;

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.state, AttemptState::Finished);
    assert_eq!(snapshot.remaining_seconds, 0);

    let stored = store.list_all().expect("history should list");
    assert_eq!(stored.len(), 2, "each timed-out run persists its own result");
}
