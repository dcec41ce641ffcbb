//! Plain-text outline summaries.
//!
//! Produces a readable listing of an outline where each slide is a block
//! separated by a blank line.

use crate::{BulletNormalizer, Outline};

/// Formatter for plain-text outline listings.
#[derive(Debug, Clone)]
pub struct OutlineSummary {
    /// Maximum bullets listed per slide.
    max_bullets: usize,
    normalizer: BulletNormalizer,
}

impl Default for OutlineSummary {
    fn default() -> Self {
        Self {
            max_bullets: usize::MAX,
            normalizer: BulletNormalizer::new(),
        }
    }
}

impl OutlineSummary {
    /// Create a formatter that lists every bullet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of bullets listed per slide.
    pub fn with_max_bullets(mut self, max: usize) -> Self {
        self.max_bullets = max.max(1);
        self
    }

    /// Format an outline.
    ///
    /// # Example output
    /// ```text
    /// 1. [title] Testing
    ///    A Comprehensive Overview
    ///
    /// 2. [content] Introduction
    ///    - This presentation explores the key aspects of Testing
    ///    - We will examine the fundamental concepts and principles
    /// ```
    pub fn format(&self, outline: &Outline) -> String {
        let blocks: Vec<String> = outline
            .iter()
            .enumerate()
            .map(|(idx, slide)| {
                let mut block = format!("{}. [{}] {}", idx + 1, slide.slide_type, slide.title);

                if !slide.subtitle.is_empty() {
                    block.push_str(&format!("\n   {}", slide.subtitle));
                }

                let lines = self.normalizer.to_lines(&slide.content);
                for line in lines.iter().take(self.max_bullets) {
                    block.push_str(&format!("\n   - {}", line));
                }
                if lines.len() > self.max_bullets {
                    block.push_str(&format!("\n   (+{} more)", lines.len() - self.max_bullets));
                }

                if !slide.image_query.is_empty() {
                    block.push_str(&format!("\n   image: {}", slide.image_query));
                }

                block
            })
            .collect();

        blocks.join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, outline: &Outline) -> String {
        format!("{}\n", self.format(outline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SlideDescriptor, SlideType};

    fn sample() -> Outline {
        Outline::new(
            vec![
                SlideDescriptor::new("Testing", SlideType::Title)
                    .with_subtitle("A Comprehensive Overview"),
                SlideDescriptor::new("Introduction", SlideType::Content)
                    .with_content("• One\n• Two\n• Three")
                    .with_image_query("testing lab"),
            ],
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_format_blocks() {
        let text = OutlineSummary::new().format(&sample());
        let expected = "1. [title] Testing\n   A Comprehensive Overview\n\n\
                        2. [content] Introduction\n   - One\n   - Two\n   - Three\n   image: testing lab";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_max_bullets() {
        let text = OutlineSummary::new().with_max_bullets(1).format(&sample());
        assert!(text.contains("   - One\n   (+2 more)"));
        assert!(!text.contains("Two"));
    }

    #[test]
    fn test_trailing_newline() {
        let text = OutlineSummary::new().format_with_newline(&sample());
        assert!(text.ends_with("testing lab\n"));
    }
}
