//! Whitespace normalization of extracted PDF text.

use crate::ticket::rules::patterns::{EXCESS_NEWLINES, HORIZONTAL_WHITESPACE};

/// Normalize line breaks and spacing so the field rules see a stable layout.
///
/// Carriage returns become line feeds, non-breaking spaces become spaces,
/// runs of spaces and tabs collapse to one space and more than two
/// consecutive line breaks collapse to two.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace('\r', "\n").replace('\u{00a0}', " ");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
