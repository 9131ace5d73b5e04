//! Turns raw model output into a [`HealthReport`].
//!
//! Never fails: anything unusable becomes [`Interpretation::Malformed`] and is
//! logged for operators.

use crate::models::{HealthReport, Interpretation};

/// Text assumed when the model returned nothing.
const EMPTY_OBJECT: &str = "{}";

pub fn interpret(raw: Option<&str>) -> Interpretation {
    let text = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => strip_code_fence(text),
        _ => EMPTY_OBJECT,
    };

    match serde_json::from_str::<HealthReport>(text) {
        Ok(report) => Interpretation::Parsed(report),
        Err(e) => {
            tracing::warn!(
                error = %e,
                response_len = text.len(),
                "JSON parse failed for AI response"
            );
            Interpretation::Malformed {
                reason: e.to_string(),
            }
        }
    }
}

/// Unwrap a ```` ```json ```` fenced block if the model added one despite
/// being asked for bare JSON. Any language tag is dropped, whatever its case.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());

    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => text,
    }
}
