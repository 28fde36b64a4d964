//! Detection of non-finite number tokens in raw JSON text

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NON_FINITE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\b(?:NaN|Infinity)\b").unwrap());

/// A bare `NaN`/`Infinity` token found outside string literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonFiniteToken {
    /// Byte offset into the line
    pub offset: usize,
    pub token: String,
}

/// Find the first non-finite token outside of JSON strings.
pub fn find_non_finite(line: &str) -> Option<NonFiniteToken> {
    // Cheap reject for the common case
    if !line.contains("NaN") && !line.contains("Infinity") {
        return None;
    }

    let spans = string_spans(line);
    NON_FINITE
        .find_iter(line)
        .find(|m| !spans.iter().any(|&(start, end)| m.start() >= start && m.start() < end))
        .map(|m| NonFiniteToken {
            offset: m.start(),
            token: m.as_str().to_string(),
        })
}

/// Byte ranges covered by string literals, quotes included.
fn string_spans(line: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    let mut escaped = false;

    for (i, b) in line.bytes().enumerate() {
        match start {
            Some(s) => {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    spans.push((s, i + 1));
                    start = None;
                }
            }
            None if b == b'"' => start = Some(i),
            None => {}
        }
    }
    // Unterminated string runs to end of line
    if let Some(s) = start {
        spans.push((s, line.len()));
    }
    spans
}
