//! Core quiz data model: answers, questions, quiz documents, and the
//! records produced by a finished attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Unique identifier for a quiz document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizId(pub String);

impl QuizId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for QuizId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an answer within a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub String);

impl AnswerId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for AnswerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Answer
// ---------------------------------------------------------------------------

/// One selectable answer within a question.
///
/// Within a saved question exactly one answer carries `is_correct = true`;
/// the editor enforces this at save time, not continuously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    /// Create an answer with a fresh id, initially marked incorrect.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: AnswerId::generate(),
            text: text.into(),
            is_correct: false,
        }
    }

    /// Create an answer with a fresh id, marked correct.
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            ..Self::new(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// Kind of question presented to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    /// Return a stable string tag.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
        }
    }
}

/// A single question with its ordered answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub explanation: String,
    /// Optional image, stored as a self-contained encoded string (data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub answers: Vec<Answer>,
}

impl Question {
    /// Create an empty multiple-choice question with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: QuestionId::generate(),
            text: text.into(),
            question_type: QuestionType::MultipleChoice,
            explanation: String::new(),
            image: None,
            answers: Vec::new(),
        }
    }

    /// The fixed answer pair for a true/false question.
    ///
    /// Both answers start marked incorrect until one is chosen correct.
    pub fn true_false_answers() -> Vec<Answer> {
        vec![Answer::new("True"), Answer::new("False")]
    }

    /// The answer currently designated correct, if any.
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    /// Look up an answer by id.
    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| &a.id == id)
    }
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// A complete quiz document as authored and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    pub description: String,
    pub randomize_questions: bool,
    pub randomize_answers: bool,
    pub time_limit_minutes: u32,
    /// Optional cover image, stored as a self-contained encoded string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Create an empty quiz draft with a fresh id.
    ///
    /// Field defaults mirror a fresh editor draft; the draft does not
    /// satisfy the finalize invariants until a time limit and at least
    /// one question are supplied.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: QuizId::generate(),
            title: title.into(),
            description: String::new(),
            randomize_questions: true,
            randomize_answers: false,
            time_limit_minutes: 0,
            image: None,
            questions: Vec::new(),
        }
    }

    /// Time limit in whole seconds.
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_minutes * 60
    }
}

// ---------------------------------------------------------------------------
// Student info and answer records
// ---------------------------------------------------------------------------

/// Student details collected before an attempt starts.
///
/// Both fields are required but carry no format validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub email: String,
}

impl StudentInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One logged response for a single question within an attempt.
///
/// Records are append-only, in presentation order. A question the student
/// never submitted (for example after a timer expiry) has no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub answer_id: AnswerId,
    pub answer_text: String,
    pub is_correct: bool,
    pub correct_answer_text: String,
    pub explanation: String,
}

// ---------------------------------------------------------------------------
// Quiz result
// ---------------------------------------------------------------------------

/// A finished attempt as persisted to the result store.
///
/// Created exactly once when an attempt reaches its terminal state,
/// immutable thereafter. The record id is assigned by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub student_info: StudentInfo,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub answer_log: Vec<AnswerRecord>,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
