//! Bullet text normalization.
//!
//! Turns the newline-delimited `content` of a slide descriptor into clean
//! bullet lines: glyphs the model typed itself are stripped, whitespace is
//! collapsed, and text is NFC-normalized before it reaches the deck.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Glyphs a model tends to prefix bullet lines with.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '*', '→', '►', '▪'];

/// Leading run of bullet glyphs and whitespace.
static LEADING_GLYPHS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s•\-*→►▪]+").unwrap());

/// Regex to collapse multiple whitespace characters into one.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Splits slide content into bullet lines.
#[derive(Debug, Clone)]
pub struct BulletNormalizer {
    /// Also split on the two-character `\n` token models sometimes emit
    /// instead of a real newline.
    split_escaped_newlines: bool,
}

impl Default for BulletNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl BulletNormalizer {
    /// Create a normalizer that splits on real and escaped newlines.
    pub fn new() -> Self {
        Self {
            split_escaped_newlines: true,
        }
    }

    /// Set whether the literal `\n` token counts as a line break.
    pub fn with_split_escaped_newlines(mut self, split: bool) -> Self {
        self.split_escaped_newlines = split;
        self
    }

    /// Normalize a single line of text.
    ///
    /// - Strips leading bullet glyphs and whitespace
    /// - Collapses whitespace runs to single spaces
    /// - Trims trailing whitespace
    /// - Applies Unicode NFC
    pub fn normalize_line(&self, line: &str) -> String {
        let stripped = LEADING_GLYPHS_REGEX.replace(line, "");
        let collapsed = WHITESPACE_COLLAPSE_REGEX.replace_all(&stripped, " ");
        collapsed.trim().nfc().collect()
    }

    /// Split content into non-empty, normalized bullet lines.
    ///
    /// Lines that are nothing but glyphs are dropped.
    pub fn to_lines(&self, content: &str) -> Vec<String> {
        let mut text = content.replace("\r\n", "\n").replace('\r', "\n");
        if self.split_escaped_newlines {
            text = text.replace("\\n", "\n");
        }

        text.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| self.normalize_line(l))
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// Normalize a title or subtitle: trimmed, whitespace-collapsed, NFC.
pub fn clean_text(text: &str) -> String {
    WHITESPACE_COLLAPSE_REGEX
        .replace_all(text.trim(), " ")
        .nfc()
        .collect()
}

/// Whether a line starts with one of [`BULLET_GLYPHS`].
pub fn starts_with_glyph(line: &str) -> bool {
    line.starts_with(BULLET_GLYPHS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_each_glyph() {
        let normalizer = BulletNormalizer::new();
        for glyph in BULLET_GLYPHS {
            let line = format!("{} Point", glyph);
            assert_eq!(normalizer.normalize_line(&line), "Point");
        }
    }

    #[test]
    fn test_strips_stacked_glyphs() {
        let normalizer = BulletNormalizer::new();
        assert_eq!(normalizer.normalize_line("- * Nested"), "Nested");
        assert_eq!(normalizer.normalize_line("  •• Double"), "Double");
    }

    #[test]
    fn test_keeps_inner_dashes() {
        let normalizer = BulletNormalizer::new();
        assert_eq!(
            normalizer.normalize_line("• Real-world examples - with asides"),
            "Real-world examples - with asides"
        );
    }

    #[test]
    fn test_to_lines_skips_blank_lines() {
        let normalizer = BulletNormalizer::new();
        let lines = normalizer.to_lines("First\n\n  \nSecond\r\nThird\n");
        assert_eq!(lines, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_escaped_newline_token() {
        let normalizer = BulletNormalizer::new();
        assert_eq!(normalizer.to_lines(r"One\nTwo\nThree"), vec!["One", "Two", "Three"]);

        let literal = BulletNormalizer::new().with_split_escaped_newlines(false);
        assert_eq!(literal.to_lines(r"One\nTwo"), vec![r"One\nTwo"]);
    }

    #[test]
    fn test_glyph_only_lines_dropped() {
        let normalizer = BulletNormalizer::new();
        assert_eq!(normalizer.to_lines("•\n- Kept\n*"), vec!["Kept"]);
    }

    #[test]
    fn test_no_line_starts_with_glyph() {
        let normalizer = BulletNormalizer::new();
        let content = "• a\n- b\n* c\n→ d\n► e\n▪ f\n-•* g";
        let lines = normalizer.to_lines(content);
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| !starts_with_glyph(l)));
    }

    #[test]
    fn test_whitespace_collapse() {
        let normalizer = BulletNormalizer::new();
        assert_eq!(normalizer.normalize_line("Hello    \t World  "), "Hello World");
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" followed by a combining acute accent composes to a single char
        let decomposed = "Caf\u{0065}\u{0301}";
        assert_eq!(clean_text(decomposed), "Caf\u{00e9}");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Deep   Learning \n"), "Deep Learning");
    }
}
