//! Turning a raw completion into an [`Outline`].

use deckgen_core::{Outline, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Text after the first ```` ```json ```` marker, up to the next fence or the end.
static JSON_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json(.*?)(?:```|\z)").unwrap());

/// Text after the first bare fence, up to the next fence or the end.
static GENERIC_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)(?:```|\z)").unwrap());

/// Remove markdown code-fence markup the model may have wrapped its answer in.
///
/// A ```` ```json ```` fence wins over a bare fence; text without a fence is
/// returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let inner = JSON_FENCE_REGEX
        .captures(raw)
        .or_else(|| GENERIC_FENCE_REGEX.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw);

    inner.trim()
}

/// Parse a completion into an outline of at most `slide_count` slides.
pub fn parse_outline(raw: &str, slide_count: usize) -> Result<Outline> {
    let cleaned = strip_code_fences(raw);
    log::debug!("Cleaned outline JSON: {}", preview(cleaned));
    Outline::from_json(cleaned, slide_count)
}

/// First 500 characters of a response, for logging.
pub(crate) fn preview(text: &str) -> &str {
    match text.char_indices().nth(500) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::{Error, SlideType};

    const BODY: &str = r#"[
        {"title": "Rust", "subtitle": "Fearless", "content": "", "slide_type": "title", "image_query": ""},
        {"title": "Ownership", "content": "One\nTwo", "slide_type": "content", "image_query": "crab"}
    ]"#;

    #[test]
    fn test_no_fence() {
        assert_eq!(strip_code_fences("  [1, 2]\n"), "[1, 2]");
    }

    #[test]
    fn test_json_fence() {
        let raw = format!("Here you go:\n```json\n{}\n```\nEnjoy!", BODY);
        assert_eq!(strip_code_fences(&raw), BODY.trim());
    }

    #[test]
    fn test_generic_fence() {
        let raw = format!("```\n{}\n```", BODY);
        assert_eq!(strip_code_fences(&raw), BODY.trim());
    }

    #[test]
    fn test_unterminated_fence() {
        let raw = format!("```json\n{}", BODY);
        assert_eq!(strip_code_fences(&raw), BODY.trim());
    }

    #[test]
    fn test_json_fence_preferred_over_generic() {
        let raw = "```\nnot this\n```\n```json\n[]\n```";
        assert_eq!(strip_code_fences(raw), "[]");
    }

    #[test]
    fn test_fenced_equals_unfenced() {
        let fenced = parse_outline(&format!("```json\n{}\n```", BODY), 5).unwrap();
        let plain = parse_outline(BODY, 5).unwrap();
        assert_eq!(fenced, plain);
        assert_eq!(plain.slides()[1].slide_type, SlideType::Content);
    }

    #[test]
    fn test_parse_rejects_object() {
        let err = parse_outline(r#"{"slides": []}"#, 5).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(600);
        assert_eq!(preview(&long).chars().count(), 500);
        assert_eq!(preview("short"), "short");
    }
}
