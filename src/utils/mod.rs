//! Utility functions.
//!
//! Collection of helper functions used across the bot.

use chrono::{DateTime, Utc};

/// Strip angle brackets so user-supplied names can't inject HTML markup.
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

/// Format a UTC instant as `DD/MM/YYYY HH:MM:SS UTC`.
pub fn format_utc(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M:%S UTC").to_string()
}

/// Format a username for display.
///
/// Returns `@username`, or the given placeholder when the user has none.
pub fn format_handle(username: Option<&str>, placeholder: &str) -> String {
    match username {
        Some(u) if !u.is_empty() => format!("@{}", u),
        _ => placeholder.to_string(),
    }
}
