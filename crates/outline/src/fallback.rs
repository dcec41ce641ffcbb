//! Deterministic outline used when the text-generation service fails.

use deckgen_core::{Outline, SlideDescriptor, SlideType};

/// Number of slides in the full fallback outline.
pub const FALLBACK_SLIDE_COUNT: usize = 5;

/// Build the fixed five-slide outline for `topic`, truncated to `slide_count`.
///
/// Pure function of its inputs: the same topic and count always give the
/// same outline.
pub fn fallback_outline(topic: &str, slide_count: usize) -> Outline {
    let slides = vec![
        SlideDescriptor::new(topic, SlideType::Title).with_subtitle("A Comprehensive Overview"),
        SlideDescriptor::new("Introduction", SlideType::Content)
            .with_content(format!(
                "This presentation explores the key aspects of {topic}\n\
                 We will examine the fundamental concepts and principles\n\
                 Understanding these elements is essential for deeper knowledge"
            ))
            .with_image_query(format!("{topic} introduction")),
        SlideDescriptor::new("Key Points", SlideType::Content)
            .with_content(format!(
                "The main characteristics define what makes {topic} important\n\
                 Historical context helps us understand current developments\n\
                 Modern applications demonstrate practical relevance today"
            ))
            .with_image_query(format!("{topic} concepts")),
        SlideDescriptor::new("Applications", SlideType::ImageFocus)
            .with_content(format!(
                "Real-world examples showcase how {topic} is used in practice\n\
                 Industry applications demonstrate tangible benefits and results\n\
                 Future developments point to exciting new possibilities"
            ))
            .with_image_query(format!("{topic} applications")),
        SlideDescriptor::new("Conclusion", SlideType::Conclusion).with_content(format!(
            "We have explored the essential aspects of {topic}\n\
             These insights provide a foundation for further exploration\n\
             Continued learning will deepen understanding and expertise"
        )),
    ];

    Outline::new(slides, slide_count).expect("fallback outline is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_min_of_count_and_five() {
        for count in 1..=8 {
            let outline = fallback_outline("Testing", count);
            assert_eq!(outline.len(), count.min(FALLBACK_SLIDE_COUNT));
        }
    }

    #[test]
    fn test_shape_of_full_outline() {
        let outline = fallback_outline("Testing", 5);
        let slides = outline.slides();

        assert_eq!(slides[0].title, "Testing");
        assert_eq!(slides[0].slide_type, SlideType::Title);
        assert_eq!(slides[0].subtitle, "A Comprehensive Overview");
        assert_eq!(slides[3].slide_type, SlideType::ImageFocus);
        assert_eq!(slides[3].image_query, "Testing applications");
        assert_eq!(slides[4].title, "Conclusion");
        assert_eq!(slides[4].slide_type, SlideType::Conclusion);
        assert!(slides[4].image_query.is_empty());
    }

    #[test]
    fn test_topic_interpolated() {
        let outline = fallback_outline("Compilers", 5);
        let intro = &outline.slides()[1];
        assert!(intro
            .content
            .starts_with("This presentation explores the key aspects of Compilers\n"));
        assert_eq!(intro.content.lines().count(), 3);
    }

    #[test]
    fn test_idempotent() {
        let a = fallback_outline("Testing", 4).to_json_pretty().unwrap();
        let b = fallback_outline("Testing", 4).to_json_pretty().unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
}
