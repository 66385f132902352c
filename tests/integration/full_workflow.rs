//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Author a quiz through the editor
//! 2. Validate and finalize it
//! 3. Persist it and load it back from the quiz store
//! 4. Take the quiz through the attempt driver
//! 5. Find the persisted result in the history
//! 6. Export the offline documents

use std::sync::Arc;

use quizforge::attempt::{AttemptCommand, AttemptDriver, AttemptState};
use quizforge::editor;
use quizforge::export;
use quizforge::model::{Answer, Question, QuestionType, Quiz, StudentInfo};
use quizforge::storage::{
    FileQuizStore, FileResultStore, MemoryResultStore, QuizStore, ResultStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

/// Let the driver's spawned persistence task run to completion.
async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

/// Select, submit, and advance past the current question.
async fn answer_current(driver: &AttemptDriver, correctly: bool) -> quizforge::Attempt {
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
    driver.apply(AttemptCommand::NextQuestion).await
}

#[tokio::test(start_paused = true)]
async fn full_workflow_author_to_history() {
    // ── Step 1: Author a quiz through the editor ─────────────────────────
    let mut quiz = Quiz::new("European Capitals");
    quiz.description = "A short tour of capital cities".to_string();
    quiz.time_limit_minutes = 10;
    quiz.randomize_questions = false;
    quiz.randomize_answers = false;

    let info_report = editor::validate_quiz_info(&quiz);
    assert!(info_report.valid, "quiz info should validate");

    let mut france = Question::new("What is the capital of France?");
    france.explanation = "Paris has been the capital since 987.".to_string();
    editor::upsert_answer(&mut france, Answer::correct("Paris"), None);
    editor::upsert_answer(&mut france, Answer::new("Lyon"), None);
    editor::upsert_answer(&mut france, Answer::new("Marseille"), None);
    assert!(
        editor::validate_question(&france).valid,
        "a three-answer question with one correct should validate"
    );
    editor::upsert_question(&mut quiz, france, None);

    let mut spain = Question::new("What is the capital of Spain?");
    editor::upsert_answer(&mut spain, Answer::correct("Madrid"), None);
    editor::upsert_answer(&mut spain, Answer::new("Barcelona"), None);
    editor::upsert_answer(&mut spain, Answer::new("Seville"), None);
    editor::upsert_question(&mut quiz, spain, None);

    // True/false questions carry the fixed pair; mark True as the answer.
    let mut bern = Question::new("Bern is the capital of Switzerland.");
    editor::set_question_type(&mut bern, QuestionType::TrueFalse);
    let true_id = bern
        .answers
        .iter()
        .find(|a| a.text == "True")
        .expect("the pair should include True")
        .id
        .clone();
    editor::set_exclusive_correct_answer(&mut bern, &true_id);
    assert!(editor::validate_question(&bern).valid);
    editor::upsert_question(&mut quiz, bern, None);

    // ── Step 2: Validate and finalize ────────────────────────────────────
    let quiz = editor::finalize_quiz(quiz).expect("a complete quiz should finalize");
    assert_eq!(quiz.questions.len(), 3);
    assert!(
        quiz.questions.iter().all(|q| !q.id.0.is_empty()),
        "every inserted question should carry a fresh id"
    );

    // ── Step 3: Persist and reload via the quiz store ────────────────────
    let dir = tempdir().expect("tempdir should be created");
    let quiz_store =
        FileQuizStore::new(dir.path().join("quizzes")).expect("quiz store should open");
    quiz_store.put(&quiz).expect("saving the quiz should succeed");

    let listed = quiz_store.list().expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "European Capitals");

    let loaded = quiz_store
        .get_required(&quiz.id)
        .expect("the saved quiz should load back");
    assert_eq!(loaded.id, quiz.id);
    assert_eq!(loaded.questions.len(), 3);
    assert_eq!(loaded.time_limit_minutes, 10);

    // ── Step 4: Take the quiz through the attempt driver ─────────────────
    let result_store = Arc::new(
        FileResultStore::new(dir.path().join("results")).expect("result store should open"),
    );
    let driver =
        AttemptDriver::spawn_with_rng(loaded, result_store.clone(), StdRng::seed_from_u64(7));

    let fresh = driver.snapshot();
    assert_eq!(fresh.state, AttemptState::CollectingStudentInfo);
    assert_eq!(
        fresh.remaining_seconds, 0,
        "the countdown must not run before the info form is submitted"
    );

    let after_info = driver
        .apply(AttemptCommand::SubmitStudentInfo(StudentInfo::new(
            "Ada Lovelace",
            "ada@example.com",
        )))
        .await;
    assert_eq!(after_info.state, AttemptState::InProgress);
    assert_eq!(after_info.remaining_seconds, 600);
    assert_eq!(after_info.presented.len(), 3);

    // France right, Spain wrong, Switzerland right.
    answer_current(&driver, true).await;
    let mid = answer_current(&driver, false).await;
    assert_eq!(mid.score, 1);
    assert_eq!(mid.answer_log.len(), 2);
    assert!(!mid.answer_log[1].is_correct);
    assert_eq!(mid.answer_log[1].correct_answer_text, "Madrid");

    let finished = answer_current(&driver, true).await;
    assert_eq!(finished.state, AttemptState::Finished);
    assert_eq!(finished.score, 2);

    let result = finished
        .result
        .expect("a finished attempt derives its result");
    assert_eq!(result.score, 2);
    assert_eq!(result.total_questions, 3);
    assert_eq!(result.quiz_title, "European Capitals");
    assert_eq!(result.student_info.name, "Ada Lovelace");
    assert_eq!(result.answer_log.len(), 3);

    // ── Step 5: The result lands in the history ──────────────────────────
    settle().await;
    let history = result_store.list_all().expect("history should list");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score, 2);
    assert_eq!(history[0].student_info.email, "ada@example.com");
    assert!(
        dir.path().join("results").join("0000000001.json").exists(),
        "the first record should land in slot 1"
    );

    // ── Step 6: Export the offline documents ─────────────────────────────
    let html = export::render_offline_html(&quiz).expect("html export should render");
    assert!(html.contains("European Capitals"));
    assert!(html.contains("const quizData"));

    let sheet = export::render_answer_sheet(&quiz);
    assert!(sheet.contains("Student Name:"));
    assert!(sheet.contains("What is the capital of France?"));

    let package = export::render_package(&quiz).expect("package export should render");
    assert_eq!(package.len(), 4);
    assert_eq!(package[0].0, "scorm/imsmanifest.xml");
}

#[tokio::test(start_paused = true)]
async fn workflow_restart_appends_an_independent_result() {
    let mut quiz = Quiz::new("Restart quiz");
    quiz.time_limit_minutes = 1;
    quiz.randomize_questions = false;
    quiz.randomize_answers = false;
    let mut q1 = Question::new("First?");
    q1.answers = vec![Answer::correct("yes"), Answer::new("no")];
    let mut q2 = Question::new("Second?");
    q2.answers = vec![Answer::correct("yes"), Answer::new("no")];
    quiz.questions = vec![q1, q2];

    let store = Arc::new(MemoryResultStore::new());
    let driver = AttemptDriver::spawn(quiz, store.clone());

    driver
        .apply(AttemptCommand::SubmitStudentInfo(StudentInfo::new(
            "Grace Hopper",
            "grace@example.com",
        )))
        .await;
    answer_current(&driver, true).await;
    let first_run = answer_current(&driver, true).await;
    assert_eq!(first_run.state, AttemptState::Finished);
    assert_eq!(first_run.score, 2);

    // Restart goes straight back to the questions with the same student.
    let restarted = driver.apply(AttemptCommand::Restart).await;
    assert_eq!(restarted.state, AttemptState::InProgress);
    assert_eq!(
        restarted
            .student_info
            .as_ref()
            .map(|info| info.name.as_str()),
        Some("Grace Hopper"),
        "restart should retain the student info"
    );
    assert_eq!(restarted.score, 0);
    assert!(restarted.answer_log.is_empty());
    assert!(restarted.result.is_none());
    assert_eq!(restarted.remaining_seconds, 60, "restart resets the clock");

    answer_current(&driver, false).await;
    let second_run = answer_current(&driver, false).await;
    assert_eq!(second_run.state, AttemptState::Finished);
    assert_eq!(second_run.score, 0);

    settle().await;
    let stored = store.list_all().expect("history should list");
    assert_eq!(stored.len(), 2, "each finished run persists its own result");
    assert_eq!(stored[0].score, 2);
    assert_eq!(stored[1].score, 0);
    assert_eq!(stored[0].student_info.name, stored[1].student_info.name);
}

#[test]
fn workflow_validation_blocks_an_incomplete_quiz() {
    // Quiz info failures are reported per field.
    let mut quiz = Quiz::new("");
    quiz.time_limit_minutes = 0;
    let report = editor::validate_quiz_info(&quiz);
    assert!(!report.valid);
    assert_eq!(report.error_for("title"), Some("Quiz title is required."));
    assert_eq!(
        report.error_for("time_limit_minutes"),
        Some("Time limit must be greater than 0.")
    );

    // A question needs 2..=5 answers and at least one correct.
    let mut lonely = Question::new("Only one option?");
    lonely.answers = vec![Answer::correct("yes")];
    let report = editor::validate_question(&lonely);
    assert_eq!(
        report.error_for("answers"),
        Some("A question must have between 2 and 5 answers.")
    );

    let mut uncertain = Question::new("No right answer?");
    uncertain.answers = vec![Answer::new("a"), Answer::new("b")];
    let report = editor::validate_question(&uncertain);
    assert_eq!(
        report.error_for("answers"),
        Some("At least one answer must be correct.")
    );

    // Finalization refuses a quiz with no questions at all.
    let mut empty = Quiz::new("Empty quiz");
    empty.time_limit_minutes = 5;
    let err = editor::finalize_quiz(empty).expect_err("an empty quiz must not finalize");
    assert!(matches!(err, quizforge::QuizError::EmptyQuiz));
}
