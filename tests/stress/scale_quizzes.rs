//! Scale test: the quiz store with many and with very large quizzes.
//!
//! Validates that listing stays sorted, lookups stay exact, and a single
//! quiz document with hundreds of questions survives the round trip.

use quizforge::model::{Answer, Question, Quiz};
use quizforge::storage::{FileQuizStore, QuizStore};
use tempfile::tempdir;

fn small_quiz(title: &str) -> Quiz {
    let mut quiz = Quiz::new(title);
    quiz.time_limit_minutes = 5;
    let mut question = Question::new("Is this a quiz?");
    question.answers = vec![Answer::correct("yes"), Answer::new("no")];
    quiz.questions = vec![question];
    quiz
}

#[test]
fn stress_1000_quizzes_put_and_list_sorted() {
    let dir = tempdir().unwrap();
    let store = FileQuizStore::new(dir.path()).unwrap();

    // Insert in reverse so the listing has to re-order everything.
    for i in (0..1000).rev() {
        let quiz = small_quiz(&format!("Quiz {i:04}"));
        store.put(&quiz).expect("put should succeed");
    }

    let listed = store.list().expect("list should succeed");
    assert_eq!(listed.len(), 1000);

    for (i, quiz) in listed.iter().enumerate() {
        assert_eq!(
            quiz.title,
            format!("Quiz {i:04}"),
            "quiz at position {i} should be in title order"
        );
    }
}

#[test]
fn stress_500_quizzes_each_retrievable_by_id() {
    let dir = tempdir().unwrap();
    let store = FileQuizStore::new(dir.path()).unwrap();

    let mut ids = Vec::with_capacity(500);
    for i in 0..500 {
        let quiz = small_quiz(&format!("Lookup {i}"));
        store.put(&quiz).expect("put should succeed");
        ids.push((quiz.id, quiz.title));
    }

    for (id, title) in &ids {
        let loaded = store
            .get(id)
            .expect("get should succeed")
            .unwrap_or_else(|| panic!("quiz '{title}' should be found"));
        assert_eq!(&loaded.title, title);
    }
}

#[test]
fn stress_1000_overwrites_keep_a_single_document() {
    let dir = tempdir().unwrap();
    let store = FileQuizStore::new(dir.path()).unwrap();

    let mut quiz = small_quiz("Churn quiz");
    for i in 0..1000 {
        quiz.description = format!("revision {i}");
        store.put(&quiz).expect("put should succeed");
    }

    let listed = store.list().expect("list should succeed");
    assert_eq!(listed.len(), 1, "overwrites must not create new documents");
    assert_eq!(listed[0].description, "revision 999");
}

#[test]
fn stress_quiz_with_300_questions_round_trips() {
    let dir = tempdir().unwrap();
    let store = FileQuizStore::new(dir.path()).unwrap();

    let mut quiz = Quiz::new("Giant quiz");
    quiz.time_limit_minutes = 120;
    for i in 0..300 {
        let mut question = Question::new(format!("Question number {i}?"));
        question.answers = vec![
            Answer::correct(format!("right {i}")),
            Answer::new(format!("wrong {i}a")),
            Answer::new(format!("wrong {i}b")),
            Answer::new(format!("wrong {i}c")),
        ];
        quiz.questions.push(question);
    }
    store.put(&quiz).expect("put should succeed");

    let loaded = store
        .get_required(&quiz.id)
        .expect("the giant quiz should load back");
    assert_eq!(loaded.questions.len(), 300);
    assert_eq!(loaded.questions[299].text, "Question number 299?");
    assert_eq!(loaded.questions[299].answers.len(), 4);
    assert!(loaded.questions[150].answers[0].is_correct);
}

#[test]
fn stress_300_deletes_leave_an_empty_store() {
    let dir = tempdir().unwrap();
    let store = FileQuizStore::new(dir.path()).unwrap();

    let mut ids = Vec::with_capacity(300);
    for i in 0..300 {
        let quiz = small_quiz(&format!("Doomed {i}"));
        store.put(&quiz).expect("put should succeed");
        ids.push(quiz.id);
    }

    for id in &ids {
        store.delete(id).expect("delete should succeed");
    }

    let listed = store.list().expect("list should succeed");
    assert!(listed.is_empty(), "all quizzes should be gone");
}
