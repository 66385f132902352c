//! Launchable package in SCORM 1.2 layout.
//!
//! Produces the complete file set for a self-contained package: an
//! `imsmanifest.xml` describing the quiz as one organization with one
//! webcontent resource, a landing page, the offline HTML player as the
//! launch resource, and the printable answer sheet. The caller decides
//! how to materialize the file set (directory tree, zip archive).

use crate::error::Result;
use crate::model::Quiz;

use super::{escape_markup, html::render_offline_html, sheet::render_answer_sheet};

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Render the package file set for `quiz` as ordered (path, contents)
/// pairs. Paths are relative and use `/` separators.
///
/// # Errors
///
/// Returns `QuizError::SerializationError` if the embedded quiz data
/// cannot be encoded.
pub fn render_package(quiz: &Quiz) -> Result<Vec<(String, String)>> {
    Ok(vec![
        ("scorm/imsmanifest.xml".to_string(), render_manifest(quiz)),
        ("scorm/index.html".to_string(), render_landing(quiz)),
        ("scorm/quiz.html".to_string(), render_offline_html(quiz)?),
        ("scorm/quiz_sheet.html".to_string(), render_answer_sheet(quiz)),
    ])
}

/// Build the SCORM 1.2 manifest for one quiz.
fn render_manifest(quiz: &Quiz) -> String {
    let title = escape_markup(&quiz.title);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest identifier="quiz_{id}" version="1.0" xmlns="http://www.imsglobal.org/xsd/imscp_v1p1">
  <metadata>
    <schema>ADL SCORM</schema>
    <schemaversion>1.2</schemaversion>
  </metadata>
  <organizations default="quiz_org">
    <organization identifier="quiz_org">
      <title>{title}</title>
      <item identifier="item_1" identifierref="resource_1">
        <title>Quiz</title>
      </item>
    </organization>
  </organizations>
  <resources>
    <resource identifier="resource_1" type="webcontent" href="index.html">
      <file href="index.html" />
      <file href="quiz.html" />
      <file href="quiz_sheet.html" />
    </resource>
  </resources>
</manifest>
"#,
        id = quiz.id.0,
    )
}

/// Build the landing page that links to the launch resource.
fn render_landing(quiz: &Quiz) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n  \
         <meta charset=\"UTF-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
         <title>{title}</title>\n\
         </head>\n\
         <body>\n  \
         <h1>{title}</h1>\n  \
         <p>{description}</p>\n  \
         <p><a href=\"quiz.html\">Start Quiz</a></p>\n\
         </body>\n\
         </html>\n",
        title = escape_markup(&quiz.title),
        description = escape_markup(&quiz.description),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
