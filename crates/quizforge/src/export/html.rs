//! Self-contained offline HTML player.
//!
//! The generated document embeds the full quiz as JSON plus inline
//! JavaScript that replays the quiz flow without any server: a countdown
//! timer shown M:SS, one question at a time with lettered answer buttons,
//! immediate correct/incorrect reveal on click, a two-second auto-advance,
//! a running score line, and a restart button. Questions play in stored
//! order.

use crate::error::{QuizError, Result};
use crate::model::Quiz;

use super::escape_markup;

// ---------------------------------------------------------------------------
// Static document chunks
// ---------------------------------------------------------------------------

const STYLE: &str = r#"  <style>
    body {
      font-family: Arial, sans-serif;
      background-color: #f4f4f9;
      margin: 0;
      padding: 0;
      display: flex;
      justify-content: center;
      align-items: center;
      height: 100vh;
    }
    .quiz-container {
      background-color: #fff;
      border-radius: 10px;
      box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
      padding: 20px;
      width: 90%;
      max-width: 600px;
      text-align: center;
    }
    .quiz-header h1 {
      font-size: 24px;
      margin-bottom: 10px;
    }
    .quiz-header p {
      font-size: 16px;
      color: #666;
    }
    .question {
      margin: 20px 0;
    }
    .question h3 {
      font-size: 20px;
      margin-bottom: 10px;
    }
    .answers {
      display: flex;
      flex-direction: column;
      gap: 10px;
    }
    .answer-button {
      background-color: #f0f0f0;
      border: none;
      border-radius: 5px;
      padding: 10px;
      font-size: 16px;
      cursor: pointer;
      text-align: left;
    }
    .answer-button.correct {
      background-color: #d4edda;
    }
    .answer-button.incorrect {
      background-color: #f8d7da;
    }
    .timer {
      font-size: 18px;
      font-weight: bold;
      margin-bottom: 20px;
    }
    .score {
      font-size: 18px;
      margin-top: 20px;
    }
    .restart-button {
      background-color: #007bff;
      color: #fff;
      border: none;
      border-radius: 5px;
      padding: 10px 20px;
      font-size: 16px;
      cursor: pointer;
      margin-top: 20px;
    }
  </style>
"#;

// The player logic. Field names follow the serialized `Quiz` document it
// reads from the embedded `quizData` constant.
const PLAYER_SCRIPT: &str = r#"    let currentQuestionIndex = 0;
    let score = 0;
    let timeLeft = quizData.time_limit_minutes * 60;
    let timerInterval;

    function startTimer() {
      timerInterval = setInterval(() => {
        timeLeft--;
        document.getElementById('time-left').textContent = formatTime(timeLeft);
        if (timeLeft <= 0) {
          clearInterval(timerInterval);
          endQuiz();
        }
      }, 1000);
    }

    function formatTime(seconds) {
      const minutes = Math.floor(seconds / 60);
      const remainingSeconds = seconds % 60;
      return `${minutes}:${remainingSeconds < 10 ? '0' : ''}${remainingSeconds}`;
    }

    function loadQuestion() {
      const quizContent = document.getElementById('quiz-content');
      const question = quizData.questions[currentQuestionIndex];
      quizContent.innerHTML = `
        <div class="question">
          <h3>${question.text}</h3>
          <div class="answers">
            ${question.answers.map((answer, index) => `
              <button class="answer-button" onclick="selectAnswer(${index})">
                ${String.fromCharCode(65 + index)}. ${answer.text}
              </button>
            `).join('')}
          </div>
        </div>
      `;
    }

    function selectAnswer(answerIndex) {
      const question = quizData.questions[currentQuestionIndex];
      const isCorrect = question.answers[answerIndex].is_correct;
      const answerButtons = document.querySelectorAll('.answer-button');

      answerButtons.forEach((button, index) => {
        button.disabled = true;
        if (question.answers[index].is_correct) {
          button.classList.add('correct');
        } else if (index === answerIndex) {
          button.classList.add('incorrect');
        }
      });

      if (isCorrect) {
        score++;
        document.getElementById('score').textContent = score;
      }

      if (currentQuestionIndex < quizData.questions.length - 1) {
        setTimeout(() => {
          currentQuestionIndex++;
          loadQuestion();
        }, 2000);
      } else {
        setTimeout(endQuiz, 2000);
      }
    }

    function endQuiz() {
      clearInterval(timerInterval);
      document.getElementById('quiz-content').innerHTML = `
        <h3>Quiz Finished!</h3>
        <p>Your score: ${score} / ${quizData.questions.length}</p>
      `;
    }

    function restartQuiz() {
      clearInterval(timerInterval);
      currentQuestionIndex = 0;
      score = 0;
      timeLeft = quizData.time_limit_minutes * 60;
      document.getElementById('score').textContent = score;
      document.getElementById('time-left').textContent = formatTime(timeLeft);
      loadQuestion();
      startTimer();
    }

    loadQuestion();
    startTimer();
"#;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Render `quiz` as one self-contained HTML document.
///
/// The document needs no network and no server; the full quiz data and the
/// player logic are embedded inline.
///
/// # Errors
///
/// Returns `QuizError::SerializationError` if the quiz cannot be encoded
/// for embedding.
pub fn render_offline_html(quiz: &Quiz) -> Result<String> {
    let quiz_json = serde_json::to_string(quiz)
        .map_err(|e| QuizError::SerializationError(e.to_string()))?
        // "</" inside any quiz text would end the inline script block early.
        .replace("</", "<\\/");

    let title = escape_markup(&quiz.title);
    let description = escape_markup(&quiz.description);

    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n  \
         <meta charset=\"UTF-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
         <title>{title}</title>\n"
    );
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "  <div class=\"quiz-container\">\n    \
         <div class=\"quiz-header\">\n      \
         <h1>{title}</h1>\n      \
         <p>{description}</p>\n    \
         </div>\n    \
         <div class=\"timer\">Time Left: <span id=\"time-left\">{minutes}:00</span></div>\n    \
         <div id=\"quiz-content\"></div>\n    \
         <div class=\"score\">Score: <span id=\"score\">0</span> / {total}</div>\n    \
         <button class=\"restart-button\" onclick=\"restartQuiz()\">Restart Quiz</button>\n  \
         </div>\n\n",
        minutes = quiz.time_limit_minutes,
        total = quiz.questions.len(),
    ));

    html.push_str(&format!("  <script>\n    const quizData = {quiz_json};\n\n"));
    html.push_str(PLAYER_SCRIPT);
    html.push_str("  </script>\n</body>\n</html>\n");

    Ok(html)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
