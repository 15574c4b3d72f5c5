//! Response normalizer — turns free-form model output into parsed JSON.
//!
//! Models wrap JSON in markdown fences and add preambles despite instructions,
//! so parsing is: strip fences, take the first `{` .. last `}` span, then
//! strict-parse. Errors carry a truncated preview only, never the full payload.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Max characters of model output included in an error message.
const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no JSON object found in model output (preview: {preview})")]
    NoJsonObject { preview: String },

    #[error("invalid JSON in model output: {message} (preview: {preview})")]
    InvalidJson { message: String, preview: String },
}

/// Parses the first well-formed JSON object out of raw model output.
pub fn parse_json_payload<T: DeserializeOwned>(raw: &str) -> Result<T, NormalizeError> {
    let stripped = strip_fences(raw);
    let candidate = extract_object_span(stripped).ok_or_else(|| NormalizeError::NoJsonObject {
        preview: preview(stripped),
    })?;
    serde_json::from_str(candidate).map_err(|e| NormalizeError::InvalidJson {
        message: e.to_string(),
        preview: preview(candidate),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Only fences at the very start/end are touched.
fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let text = if let Some(rest) = text.strip_prefix("```") {
        // Drop an optional language tag up to the end of the fence line.
        match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        }
    } else {
        text
    };
    let text = text.trim_end();
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Returns the span from the first `{` to the last `}`, tolerating
/// preambles and postambles around the object.
fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Truncates text to a bounded preview for error messages and logs.
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let mut p: String = text.chars().take(PREVIEW_CHARS).collect();
        p.push_str("...");
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_parses_plain_json() {
        let v: Value = parse_json_payload(r#"{"key": "value"}"#).unwrap();
        assert_eq!(v["key"], "value");
    }

    #[test]
    fn test_strips_fence_with_language_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        let v: Value = parse_json_payload(input).unwrap();
        assert_eq!(v["key"], "value");
    }

    #[test]
    fn test_strips_fence_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        let v: Value = parse_json_payload(input).unwrap();
        assert_eq!(v["key"], "value");
    }

    #[test]
    fn test_tolerates_preamble_and_postamble() {
        let input = "Here is the JSON you asked for:\n{\"a\": 1}\nHope that helps!";
        let v: Value = parse_json_payload(input).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_no_object_is_an_error() {
        let err = parse_json_payload::<Value>("no json here at all").unwrap_err();
        assert!(matches!(err, NormalizeError::NoJsonObject { .. }));
    }

    #[test]
    fn test_malformed_json_error_preview_is_bounded() {
        let garbage = format!("{{\"key\": \"{}", "x".repeat(5000));
        let err = parse_json_payload::<Value>(&garbage).unwrap_err();
        let msg = err.to_string();
        // Preview is capped; the 5000-char payload must not leak wholesale.
        assert!(msg.len() < 400, "error message too long: {} chars", msg.len());
    }

    #[test]
    fn test_preview_keeps_short_text_intact() {
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_nested_braces_survive_span_extraction() {
        let input = "prefix {\"outer\": {\"inner\": 2}} suffix";
        let v: Value = parse_json_payload(input).unwrap();
        assert_eq!(v["outer"]["inner"], 2);
    }
}
