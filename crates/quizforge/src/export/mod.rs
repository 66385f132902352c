//! Export renderers — offline documents derived from a finished quiz.
//!
//! The export module provides:
//! - A self-contained offline HTML player embedding the full quiz data
//! - A printable answer sheet with lettered checkbox options and no key
//! - A launchable package in SCORM 1.2 layout
//!
//! Every renderer is a pure function of the `Quiz` value. Nothing here
//! reaches back into the attempt engine or any store; writing the
//! rendered documents to disk (or zipping the package) is the caller's
//! concern.

pub mod html;
pub mod package;
pub mod sheet;

pub use html::render_offline_html;
pub use package::render_package;
pub use sheet::render_answer_sheet;

use crate::model::Quiz;

/// File-name stem for exported documents: the quiz title with spaces
/// replaced by underscores.
pub fn file_stem(quiz: &Quiz) -> String {
    quiz.title.replace(' ', "_")
}

/// Escape text for inclusion in HTML (or XML) content and attributes.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Letter label for an answer position: 0 -> 'A', 1 -> 'B', ...
pub(crate) fn answer_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}
