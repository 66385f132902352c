//! Printable answer sheet.
//!
//! A static HTML document meant for paper: student name and date lines,
//! the quiz title and time limit, then every question with lettered
//! checkbox options in a two-column layout. Carries no answer key, no
//! explanations, and no scripting.

use crate::model::Quiz;

use super::{answer_letter, escape_markup};

// ---------------------------------------------------------------------------
// Static document chunks
// ---------------------------------------------------------------------------

const SHEET_STYLE: &str = r#"  <style>
    body {
      font-family: Arial, sans-serif;
      margin: 40px;
      color: #000;
    }
    h1 {
      font-size: 22px;
      margin-bottom: 12px;
    }
    header p {
      font-size: 13px;
      margin: 6px 0;
    }
    hr {
      margin: 16px 0;
    }
    .questions {
      column-count: 2;
      column-gap: 40px;
      column-rule: 1px solid #ccc;
    }
    .question {
      break-inside: avoid;
      margin-bottom: 18px;
    }
    .question h3 {
      font-size: 14px;
      margin: 0 0 8px 0;
    }
    .answer {
      font-size: 13px;
      margin: 4px 0 4px 4px;
    }
    .checkbox {
      display: inline-block;
      width: 11px;
      height: 11px;
      border: 1px solid #000;
      margin-right: 8px;
      vertical-align: middle;
    }
    @media print {
      body {
        margin: 15mm;
      }
    }
  </style>
"#;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Render `quiz` as a printable answer sheet.
///
/// Questions are numbered in stored order; options are lettered A., B.,
/// C., ... with an empty checkbox each. Correctness never appears in the
/// output.
pub fn render_answer_sheet(quiz: &Quiz) -> String {
    let title = escape_markup(&quiz.title);

    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n  \
         <meta charset=\"UTF-8\">\n  \
         <title>Quiz Sheet: {title}</title>\n"
    );
    html.push_str(SHEET_STYLE);
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "  <header>\n    \
         <h1>Quiz Sheet</h1>\n    \
         <p>Student Name: ________________________</p>\n    \
         <p>Date: ________________________</p>\n    \
         <p>Quiz Title: {title}</p>\n    \
         <p>Time Limit: {minutes} minutes</p>\n  \
         </header>\n  <hr>\n",
        minutes = quiz.time_limit_minutes,
    ));

    html.push_str("  <main class=\"questions\">\n");
    for (index, question) in quiz.questions.iter().enumerate() {
        html.push_str(&format!(
            "    <div class=\"question\">\n      <h3>{}. {}</h3>\n",
            index + 1,
            escape_markup(&question.text)
        ));
        for (ans_index, answer) in question.answers.iter().enumerate() {
            html.push_str(&format!(
                "      <div class=\"answer\"><span class=\"checkbox\"></span>{}. {}</div>\n",
                answer_letter(ans_index),
                escape_markup(&answer.text)
            ));
        }
        html.push_str("    </div>\n");
    }
    html.push_str("  </main>\n</body>\n</html>\n");

    html
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
