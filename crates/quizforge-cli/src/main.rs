//! Quizforge CLI — `quizforge` command.
//!
//! Author quizzes from JSON drafts, take them interactively under their
//! time limit, browse the result history, and export offline documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Deserialize;

use quizforge::advisory::{CannedExplanations, ExplanationService};
use quizforge::attempt::{AttemptCommand, AttemptDriver, AttemptState};
use quizforge::editor;
use quizforge::export::{file_stem, render_answer_sheet, render_offline_html, render_package};
use quizforge::model::{Answer, Question, QuestionType, Quiz, QuizId, StudentInfo};
use quizforge::storage::{FileQuizStore, FileResultStore, QuizStore, ResultStore};
use quizforge::time::{format_countdown, format_timestamp};

// ── Directory helpers ─────────────────────────────────────────────────────────

fn quizforge_dir() -> PathBuf {
    let home = std::env::var("HOME").expect("HOME not set");
    PathBuf::from(home).join(".quizforge")
}

fn quizzes_dir(base: &Path) -> PathBuf {
    base.join("quizzes")
}

fn results_dir(base: &Path) -> PathBuf {
    base.join("results")
}

// ── Input helpers ─────────────────────────────────────────────────────────────

fn read_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt until the student enters something non-blank.
fn read_required(prompt: &str) -> Result<String> {
    loop {
        let value = read_line(prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
        eprintln!("This field is required.");
    }
}

fn answer_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// Map a typed letter to an answer index, if it names one.
fn parse_answer_index(input: &str, answer_count: usize) -> Option<usize> {
    let mut chars = input.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    let index = (letter as u8 - b'A') as usize;
    (index < answer_count).then_some(index)
}

// ── Quiz drafts ───────────────────────────────────────────────────────────────

/// Author-facing quiz document, deserialized from the file handed to
/// `quizforge create`. Ids are never part of a draft; the editor assigns
/// them on insert.
#[derive(Debug, Deserialize)]
struct QuizDraft {
    title: String,
    #[serde(default)]
    description: String,
    time_limit_minutes: u32,
    #[serde(default)]
    randomize_questions: Option<bool>,
    #[serde(default)]
    randomize_answers: Option<bool>,
    #[serde(default)]
    questions: Vec<QuestionDraft>,
}

#[derive(Debug, Deserialize)]
struct QuestionDraft {
    text: String,
    /// "multiple_choice" (default) or "true_false".
    #[serde(default, rename = "type")]
    question_type: Option<String>,
    #[serde(default)]
    explanation: String,
    /// Options for multiple-choice questions.
    #[serde(default)]
    answers: Vec<AnswerDraft>,
    /// The correct side for true/false questions: "True" or "False".
    #[serde(default)]
    correct: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnswerDraft {
    text: String,
    #[serde(default)]
    correct: bool,
}

/// Assemble and validate a quiz from its draft through the editor
/// operations, exactly as an interactive authoring flow would.
fn build_quiz(draft: QuizDraft) -> Result<Quiz> {
    let mut quiz = Quiz::new(draft.title);
    quiz.description = draft.description;
    quiz.time_limit_minutes = draft.time_limit_minutes;
    if let Some(randomize) = draft.randomize_questions {
        quiz.randomize_questions = randomize;
    }
    if let Some(randomize) = draft.randomize_answers {
        quiz.randomize_answers = randomize;
    }

    let info = editor::validate_quiz_info(&quiz);
    if !info.valid {
        return Err(anyhow!("invalid quiz: {}", describe_errors(&info)));
    }

    for (index, question_draft) in draft.questions.into_iter().enumerate() {
        let question = build_question(question_draft)
            .with_context(|| format!("question {} is invalid", index + 1))?;

        let report = editor::validate_question(&question);
        if !report.valid {
            return Err(anyhow!(
                "question {} is invalid: {}",
                index + 1,
                describe_errors(&report)
            ));
        }

        editor::upsert_question(&mut quiz, question, None);
    }

    editor::finalize_quiz(quiz).map_err(Into::into)
}

fn build_question(draft: QuestionDraft) -> Result<Question> {
    let mut question = Question::new(draft.text);
    question.explanation = draft.explanation;

    match draft.question_type.as_deref() {
        None | Some("multiple_choice") => {
            for answer_draft in draft.answers {
                let answer = if answer_draft.correct {
                    Answer::correct(answer_draft.text)
                } else {
                    Answer::new(answer_draft.text)
                };
                editor::upsert_answer(&mut question, answer, None);
            }
        }
        Some("true_false") => {
            editor::set_question_type(&mut question, QuestionType::TrueFalse);
            let side = draft
                .correct
                .ok_or_else(|| anyhow!("true_false questions need \"correct\": \"True\" or \"False\""))?;
            let answer_id = question
                .answers
                .iter()
                .find(|a| a.text.eq_ignore_ascii_case(&side))
                .map(|a| a.id.clone())
                .ok_or_else(|| anyhow!("\"correct\" must be \"True\" or \"False\", got '{side}'"))?;
            editor::set_exclusive_correct_answer(&mut question, &answer_id);
        }
        Some(other) => {
            return Err(anyhow!(
                "unknown question type '{other}' (expected multiple_choice or true_false)"
            ));
        }
    }

    Ok(question)
}

fn describe_errors(report: &quizforge::ValidationReport) -> String {
    report
        .errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// Quizforge CLI — build quizzes, take them under a countdown, and export
/// offline documents.
#[derive(Parser, Debug)]
#[command(
    name = "quizforge",
    about = "Quizforge CLI",
    version,
    long_about = "quizforge — Quizforge CLI\n\nAuthor multiple-choice and true/false quizzes, take them\ninteractively under a time limit, and export offline documents."
)]
struct Cli {
    /// Data directory (default: ~/.quizforge)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a quiz from a JSON draft file
    Create {
        /// Path to the quiz draft
        file: PathBuf,
    },

    /// List stored quizzes
    List,

    /// Display one quiz in full
    Show {
        /// Quiz id
        quiz_id: String,
    },

    /// Delete a stored quiz
    Delete {
        /// Quiz id
        quiz_id: String,
    },

    /// Take a quiz interactively under its time limit
    Take {
        /// Quiz id
        quiz_id: String,
    },

    /// List past results
    History,

    /// Export offline documents for a quiz
    Export {
        /// Quiz id
        quiz_id: String,

        /// Export format (html, sheet, or package)
        #[arg(long, default_value = "html")]
        format: String,

        /// Output directory (default: current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let base = cli.data_dir.unwrap_or_else(quizforge_dir);

    let result = match cli.command {
        Commands::Create { file } => cmd_create(&base, &file, verbose),
        Commands::List => cmd_list(&base),
        Commands::Show { quiz_id } => cmd_show(&base, &quiz_id, verbose),
        Commands::Delete { quiz_id } => cmd_delete(&base, &quiz_id),
        Commands::Take { quiz_id } => cmd_take(&base, &quiz_id).await,
        Commands::History => cmd_history(&base, verbose),
        Commands::Export {
            quiz_id,
            format,
            output,
        } => cmd_export(&base, &quiz_id, &format, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `quizforge create DRAFT.json`
fn cmd_create(base: &Path, file: &Path, verbose: bool) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("failed to read draft file {}", file.display()))?;
    let draft: QuizDraft = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse draft file {}", file.display()))?;

    let quiz = build_quiz(draft)?;

    let store = FileQuizStore::new(quizzes_dir(base)).context("failed to open quiz store")?;
    store.put(&quiz).context("failed to save quiz")?;

    println!("Created quiz '{}'", quiz.title);
    println!("  ID:        {}", quiz.id);
    println!("  Questions: {}", quiz.questions.len());
    println!("  Time limit: {} minute(s)", quiz.time_limit_minutes);

    if verbose {
        for (index, question) in quiz.questions.iter().enumerate() {
            println!(
                "  [{}] {} ({}, {} answers)",
                index + 1,
                question.text,
                question.question_type.as_tag(),
                question.answers.len()
            );
        }
    }

    Ok(())
}

/// `quizforge list`
fn cmd_list(base: &Path) -> Result<()> {
    let store = FileQuizStore::new(quizzes_dir(base)).context("failed to open quiz store")?;
    let quizzes = store.list().context("failed to list quizzes")?;

    if quizzes.is_empty() {
        println!("No quizzes found in {}", quizzes_dir(base).display());
        return Ok(());
    }

    println!("{:<30} {:<38} {:>9} {:>7}", "TITLE", "ID", "QUESTIONS", "LIMIT");
    println!("{}", "-".repeat(88));

    for quiz in &quizzes {
        println!(
            "{:<30} {:<38} {:>9} {:>6}m",
            quiz.title,
            quiz.id,
            quiz.questions.len(),
            quiz.time_limit_minutes
        );
    }

    Ok(())
}

/// `quizforge show QUIZ_ID`
fn cmd_show(base: &Path, quiz_id: &str, verbose: bool) -> Result<()> {
    let store = FileQuizStore::new(quizzes_dir(base)).context("failed to open quiz store")?;
    let quiz = store.get_required(&QuizId(quiz_id.to_string()))?;

    println!("Quiz: {}", quiz.title);
    println!("  ID:          {}", quiz.id);
    if !quiz.description.is_empty() {
        println!("  Description: {}", quiz.description);
    }
    println!("  Time limit:  {} minute(s)", quiz.time_limit_minutes);
    println!(
        "  Randomize:   questions={}, answers={}",
        quiz.randomize_questions, quiz.randomize_answers
    );
    println!("  Questions:   {}", quiz.questions.len());

    for (index, question) in quiz.questions.iter().enumerate() {
        println!();
        println!(
            "  {}. {} ({})",
            index + 1,
            question.text,
            question.question_type.as_tag()
        );
        for (ans_index, answer) in question.answers.iter().enumerate() {
            let marker = if answer.is_correct { "*" } else { " " };
            println!(
                "    {} {}. {}",
                marker,
                answer_letter(ans_index),
                answer.text
            );
        }
        if verbose && !question.explanation.is_empty() {
            println!("     Explanation: {}", question.explanation);
        }
    }

    Ok(())
}

/// `quizforge delete QUIZ_ID`
fn cmd_delete(base: &Path, quiz_id: &str) -> Result<()> {
    let store = FileQuizStore::new(quizzes_dir(base)).context("failed to open quiz store")?;
    let id = QuizId(quiz_id.to_string());

    let quiz = store.get_required(&id)?;
    store.delete(&id).context("failed to delete quiz")?;

    println!("Deleted quiz '{}' ({})", quiz.title, id);
    Ok(())
}

/// `quizforge take QUIZ_ID`
async fn cmd_take(base: &Path, quiz_id: &str) -> Result<()> {
    let quizzes = FileQuizStore::new(quizzes_dir(base)).context("failed to open quiz store")?;
    let quiz = quizzes.get_required(&QuizId(quiz_id.to_string()))?;

    let results: Arc<dyn ResultStore + Send + Sync> = Arc::new(
        FileResultStore::new(results_dir(base)).context("failed to open result store")?,
    );

    println!("Quiz: {}", quiz.title);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!(
        "{} question(s), {} minute(s). The countdown starts when you begin.",
        quiz.questions.len(),
        quiz.time_limit_minutes
    );
    println!();

    let name = read_required("Student name: ")?;
    let email = read_required("Student email: ")?;

    let driver = AttemptDriver::spawn(quiz, results);
    let mut attempt = driver
        .apply(AttemptCommand::SubmitStudentInfo(StudentInfo::new(
            name, email,
        )))
        .await;

    loop {
        // One run of the quiz.
        while attempt.state == AttemptState::InProgress {
            let Some(question) = attempt.current_question().cloned() else {
                break;
            };

            println!();
            println!(
                "[{}/{}] {}  (time left {})",
                attempt.current_index + 1,
                attempt.total_questions(),
                question.text,
                format_countdown(attempt.remaining_seconds)
            );
            for (index, answer) in question.answers.iter().enumerate() {
                println!("  {}. {}", answer_letter(index), answer.text);
            }

            let Some(index) = prompt_for_answer(&driver, question.answers.len())? else {
                // Time expired while waiting for input.
                break;
            };

            let answer_id = question.answers[index].id.clone();
            let logged_before = attempt.answer_log.len();
            driver.apply(AttemptCommand::SelectAnswer(answer_id)).await;
            attempt = driver.apply(AttemptCommand::SubmitAnswer).await;

            if attempt.answer_log.len() > logged_before {
                if let Some(record) = attempt.answer_log.last() {
                    if record.is_correct {
                        println!("Correct!");
                    } else {
                        println!("Incorrect. Correct answer: {}", record.correct_answer_text);
                    }
                }
            }

            attempt = driver.apply(AttemptCommand::NextQuestion).await;
        }

        // The apply snapshots can precede the expiry tick; settle on the
        // driver's view of the finished run.
        attempt = driver.snapshot();
        print_run_summary(&attempt).await;

        let again = read_line("Take the quiz again with the same student? [y/N]: ")?;
        if again.eq_ignore_ascii_case("y") {
            attempt = driver.apply(AttemptCommand::Restart).await;
        } else {
            break;
        }
    }

    // The result write is fire-and-forget from the driver and runtime
    // shutdown does not wait for spawned tasks.
    tokio::time::sleep(Duration::from_millis(200)).await;

    Ok(())
}

/// Read answer letters until one names an option, returning `None` once
/// the attempt is no longer running.
fn prompt_for_answer(driver: &AttemptDriver, answer_count: usize) -> Result<Option<usize>> {
    loop {
        let input = read_line("Your answer: ")?;

        if driver.snapshot().state != AttemptState::InProgress {
            return Ok(None);
        }

        match parse_answer_index(&input, answer_count) {
            Some(index) => return Ok(Some(index)),
            None => eprintln!(
                "Enter a letter between A and {}.",
                answer_letter(answer_count.saturating_sub(1))
            ),
        }
    }
}

/// Print the score line and the per-question review for a finished run.
async fn print_run_summary(attempt: &quizforge::Attempt) {
    println!();
    println!(
        "Quiz finished! Score: {} / {}",
        attempt.score,
        attempt.total_questions()
    );

    if attempt.answer_log.is_empty() {
        println!("No questions were answered before the time ran out.");
        return;
    }

    let advisor = CannedExplanations;
    for (index, record) in attempt.answer_log.iter().enumerate() {
        let verdict = if record.is_correct { "correct" } else { "incorrect" };
        println!();
        println!("  {}. {} [{verdict}]", index + 1, record.question_text);
        println!("     Your answer: {}", record.answer_text);
        if !record.is_correct {
            println!("     Correct answer: {}", record.correct_answer_text);
        }

        // Fall back to the advisory service when the author wrote no
        // explanation; a failed lookup just means no line is printed.
        if !record.explanation.is_empty() {
            println!("     Explanation: {}", record.explanation);
        } else {
            match advisor
                .explain(&record.question_text, &record.correct_answer_text)
                .await
            {
                Ok(text) => println!("     Explanation: {text}"),
                Err(e) => debug!("explanation lookup failed: {e}"),
            }
        }
    }
}

/// `quizforge history`
fn cmd_history(base: &Path, verbose: bool) -> Result<()> {
    let store = FileResultStore::new(results_dir(base)).context("failed to open result store")?;
    let results = store.list_all().context("failed to list results")?;

    if results.is_empty() {
        println!("No results recorded yet.");
        return Ok(());
    }

    println!("{:<20} {:<30} {:>7}  WHEN", "STUDENT", "QUIZ", "SCORE");
    println!("{}", "-".repeat(84));

    for result in &results {
        println!(
            "{:<20} {:<30} {:>7}  {}",
            result.student_info.name,
            result.quiz_title,
            format!("{}/{}", result.score, result.total_questions),
            format_timestamp(&result.timestamp)
        );

        if verbose {
            for record in &result.answer_log {
                let verdict = if record.is_correct { "correct" } else { "incorrect" };
                println!("    - {} -> {} [{verdict}]", record.question_text, record.answer_text);
            }
        }
    }

    Ok(())
}

/// `quizforge export QUIZ_ID [--format html|sheet|package] [--output DIR]`
fn cmd_export(base: &Path, quiz_id: &str, format: &str, output: Option<&Path>) -> Result<()> {
    let store = FileQuizStore::new(quizzes_dir(base)).context("failed to open quiz store")?;
    let quiz = store.get_required(&QuizId(quiz_id.to_string()))?;

    let out_dir = output.unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let stem = file_stem(&quiz);

    match format {
        "html" => {
            let document = render_offline_html(&quiz)?;
            let path = out_dir.join(format!("{stem}_quiz.html"));
            std::fs::write(&path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        "sheet" => {
            let document = render_answer_sheet(&quiz);
            let path = out_dir.join(format!("{stem}_quiz_sheet.html"));
            std::fs::write(&path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        "package" => {
            let root = out_dir.join(format!("{stem}_scorm"));
            for (relative, contents) in render_package(&quiz)? {
                let path = root.join(&relative);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create directory {}", parent.display())
                    })?;
                }
                std::fs::write(&path, contents)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
        }
        other => {
            return Err(anyhow!(
                "unknown export format '{other}' (expected html, sheet, or package)"
            ));
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
