//! Time utilities for Quizforge.
//!
//! All persisted timestamps are `chrono::DateTime<Utc>` values, serialized
//! as RFC 3339 strings.

use chrono::{DateTime, Utc};

/// Return the current UTC time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp for human-readable display.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Format a whole-second countdown as `M:SS`.
pub fn format_countdown(remaining_seconds: u32) -> String {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}
