//! Outline to deck rendering.
//!
//! Index 0 and every `title` descriptor become title slides; everything else
//! becomes a content slide with a title, a bullet body and, when the image
//! rule fires, a picture in the right-hand zone. How bullets are laid out is
//! delegated to a [`BulletStrategy`].

use crate::deck::{Alignment, Deck, Paragraph, Placeholder, Slide, SlideLayout, TextShape};
use deckgen_core::bullets::clean_text;
use deckgen_core::{
    BulletNormalizer, Error, ImageProvider, LayoutConfig, Outline, Rect, Result,
    SlideDescriptor, SlideType,
};
use std::fs;
use std::path::{Path, PathBuf};

const TITLE_SLIDE_TITLE_PT: f64 = 44.0;
const TITLE_SLIDE_SUBTITLE_PT: f64 = 24.0;
const CONTENT_TITLE_PT: f64 = 32.0;
const BODY_COLOR: [u8; 3] = [0x33, 0x33, 0x33];
const BODY_LINE_SPACING: f64 = 1.2;

/// How a content slide's title and bullets are turned into shapes.
pub trait BulletStrategy {
    /// Layout the content slide is based on.
    fn layout(&self) -> SlideLayout;

    fn title_shape(&self, title: &str, frame: Rect) -> TextShape;

    /// Shape holding one paragraph per bullet line.
    fn body_shape(&self, bullets: &[String], frame: Rect) -> TextShape;
}

/// Free-floating text boxes on a blank layout; bullets carry no glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomTextFrame;

impl CustomTextFrame {
    const BULLET_PT: f64 = 18.0;
    const SPACING_PT: f64 = 8.0;
}

impl BulletStrategy for CustomTextFrame {
    fn layout(&self) -> SlideLayout {
        SlideLayout::Blank
    }

    fn title_shape(&self, title: &str, frame: Rect) -> TextShape {
        TextShape::text_box("Title 1", frame).with_paragraph(
            Paragraph::new(title)
                .size(CONTENT_TITLE_PT)
                .bold()
                .color([0, 0, 0]),
        )
    }

    fn body_shape(&self, bullets: &[String], frame: Rect) -> TextShape {
        let mut shape = TextShape::text_box("Content 2", frame);
        for line in bullets {
            shape.push(
                Paragraph::new(line.as_str())
                    .size(Self::BULLET_PT)
                    .color(BODY_COLOR)
                    .spacing(Some(Self::SPACING_PT), Some(Self::SPACING_PT))
                    .line_spacing(BODY_LINE_SPACING),
            );
        }
        shape
    }
}

/// The "Title and Content" layout's placeholders, so the master's bullet
/// glyphs apply. The body placeholder is moved to the computed text zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePlaceholder;

impl NativePlaceholder {
    const BULLET_PT: f64 = 20.0;
    const SPACE_AFTER_PT: f64 = 6.0;
    const FONT: &'static str = "Calibri";
}

impl BulletStrategy for NativePlaceholder {
    fn layout(&self) -> SlideLayout {
        SlideLayout::TitleAndContent
    }

    fn title_shape(&self, title: &str, frame: Rect) -> TextShape {
        TextShape::placeholder("Title 1", Placeholder::Title)
            .with_frame(frame)
            .with_paragraph(Paragraph::new(title).size(CONTENT_TITLE_PT).bold())
    }

    fn body_shape(&self, bullets: &[String], frame: Rect) -> TextShape {
        let mut shape =
            TextShape::placeholder("Content Placeholder 2", Placeholder::Body).with_frame(frame);
        for line in bullets {
            shape.push(
                Paragraph::new(line.as_str())
                    .size(Self::BULLET_PT)
                    .font(Self::FONT)
                    .color(BODY_COLOR)
                    .spacing(None, Some(Self::SPACE_AFTER_PT))
                    .line_spacing(BODY_LINE_SPACING),
            );
        }
        shape
    }
}

/// Selector for the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletStyle {
    #[default]
    Custom,
    Native,
}

impl BulletStyle {
    pub fn strategy(self) -> Box<dyn BulletStrategy> {
        match self {
            Self::Custom => Box::new(CustomTextFrame),
            Self::Native => Box::new(NativePlaceholder),
        }
    }
}

/// Renders outlines into decks.
pub struct DeckRenderer<P> {
    images: P,
    layout: LayoutConfig,
    strategy: Box<dyn BulletStrategy>,
    normalizer: BulletNormalizer,
}

impl<P: ImageProvider> DeckRenderer<P> {
    /// Renderer with the default layout and [`CustomTextFrame`] bullets.
    pub fn new(images: P) -> Self {
        Self {
            images,
            layout: LayoutConfig::default(),
            strategy: BulletStyle::default().strategy(),
            normalizer: BulletNormalizer::new(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn BulletStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_bullet_style(self, style: BulletStyle) -> Self {
        self.with_strategy(style.strategy())
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Build the deck for `outline` in memory.
    pub fn build(&mut self, outline: &Outline) -> Deck {
        let mut deck = Deck::new(&self.layout);
        if let Some(first) = outline.slides().first() {
            deck.set_title(clean_text(&first.title));
        }

        for (idx, desc) in outline.iter().enumerate() {
            log::debug!("Creating slide {}: {}", idx + 1, desc.title);
            let slide = if idx == 0 || desc.slide_type == SlideType::Title {
                self.title_slide(desc)
            } else {
                self.content_slide(&mut deck, idx, desc)
            };
            deck.push_slide(slide);
        }

        deck
    }

    /// Render `outline` and write it to `path`.
    ///
    /// Only the final write can fail; image problems are logged and skipped.
    pub fn render(&mut self, outline: &Outline, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let deck = self.build(outline);
        deck.save(path)?;
        log::info!("Saved {} slides to {}", deck.slide_count(), path.display());
        Ok(path.to_path_buf())
    }

    fn title_slide(&self, desc: &SlideDescriptor) -> Slide {
        let mut slide = Slide::new(SlideLayout::Title);
        slide.add_text(
            TextShape::placeholder("Title 1", Placeholder::CenteredTitle).with_paragraph(
                Paragraph::new(clean_text(&desc.title))
                    .size(TITLE_SLIDE_TITLE_PT)
                    .bold()
                    .align(Alignment::Center),
            ),
        );

        let subtitle = clean_text(&desc.subtitle);
        if !subtitle.is_empty() {
            slide.add_text(
                TextShape::placeholder("Subtitle 2", Placeholder::Subtitle).with_paragraph(
                    Paragraph::new(subtitle)
                        .size(TITLE_SLIDE_SUBTITLE_PT)
                        .align(Alignment::Center),
                ),
            );
        }

        slide
    }

    fn content_slide(&mut self, deck: &mut Deck, idx: usize, desc: &SlideDescriptor) -> Slide {
        let query = if wants_image(idx, desc) {
            image_query(desc)
        } else {
            None
        };
        let mut slide = Slide::new(self.strategy.layout());

        let title = clean_text(&desc.title);
        slide.add_text(self.strategy.title_shape(&title, self.layout.title_frame()));

        let bullets = self.normalizer.to_lines(&desc.content);
        slide.add_text(
            self.strategy
                .body_shape(&bullets, self.layout.body_frame(query.is_some())),
        );

        if let Some(query) = query {
            if let Err(e) = self.attach_image(deck, &mut slide, query) {
                log::warn!("Skipping image for slide {} ('{}'): {}", idx + 1, query, e);
            }
        }

        slide
    }

    /// Acquire an image, embed it and place it in the image zone.
    ///
    /// The scratch file is removed whether or not embedding succeeded.
    fn attach_image(&mut self, deck: &mut Deck, slide: &mut Slide, query: &str) -> Result<()> {
        let path = self.images.acquire(query)?;
        let result = embed_image(deck, slide, &self.layout, &path, query);
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("Failed to remove {}: {}", path.display(), e);
        }
        result
    }
}

fn embed_image(
    deck: &mut Deck,
    slide: &mut Slide,
    layout: &LayoutConfig,
    path: &Path,
    query: &str,
) -> Result<()> {
    let bytes = fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| Error::ImageError(format!("Failed to decode {}: {}", path.display(), e)))?;
    let frame = layout.picture_frame(decoded.width(), decoded.height());
    let media = deck.add_media(bytes)?;
    slide.add_picture(media, frame, query);
    Ok(())
}

/// A content slide gets an image when it names a query or sits at an odd
/// index. The two triggers are independent.
pub fn wants_image(idx: usize, desc: &SlideDescriptor) -> bool {
    !desc.image_query.trim().is_empty() || idx % 2 == 1
}

/// Search query for a slide's image, falling back to its title.
///
/// `None` when both are blank; such a slide gets no image.
pub fn image_query(desc: &SlideDescriptor) -> Option<&str> {
    [desc.image_query.trim(), desc.title.trim()]
        .into_iter()
        .find(|q| !q.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Shape;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records queries and never produces a file.
    struct FailingProvider {
        queries: Rc<RefCell<Vec<String>>>,
    }

    impl ImageProvider for FailingProvider {
        fn acquire(&mut self, query: &str) -> Result<PathBuf> {
            self.queries.borrow_mut().push(query.to_string());
            Err(Error::ImageError("offline".to_string()))
        }
    }

    fn outline() -> Outline {
        Outline::new(
            vec![
                SlideDescriptor::new("Deck", SlideType::Title).with_subtitle("Sub"),
                SlideDescriptor::new("Odd", SlideType::Content).with_content("• a\n- b"),
                SlideDescriptor::new("Even", SlideType::Content).with_content("c"),
                SlideDescriptor::new("Queried", SlideType::Content).with_image_query("sea"),
                SlideDescriptor::new("Section", SlideType::Title),
            ],
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_image_rule() {
        let plain = SlideDescriptor::new("T", SlideType::Content);
        assert!(!wants_image(2, &plain));
        assert!(wants_image(3, &plain));
        let queried = plain.clone().with_image_query("x");
        assert!(wants_image(2, &queried));
        assert_eq!(image_query(&plain), Some("T"));
        assert_eq!(image_query(&queried), Some("x"));
    }

    #[test]
    fn test_blank_query_and_title_skip_image() {
        let queries = Rc::new(RefCell::new(Vec::new()));
        let mut renderer = DeckRenderer::new(FailingProvider {
            queries: queries.clone(),
        });
        let layout = renderer.layout().clone();
        let outline = Outline::new(
            vec![
                SlideDescriptor::new("Deck", SlideType::Title),
                SlideDescriptor::new("   ", SlideType::Content).with_content("a"),
            ],
            5,
        )
        .unwrap();

        let deck = renderer.build(&outline);
        assert!(queries.borrow().is_empty());
        match &deck.slides()[1].shapes()[1] {
            Shape::Text(body) => {
                assert_eq!(body.frame.map(|f| f.width), Some(layout.text_zone_width(false)))
            }
            Shape::Picture(_) => panic!("expected the body text shape"),
        }
    }

    #[test]
    fn test_image_failure_does_not_abort() {
        let queries = Rc::new(RefCell::new(Vec::new()));
        let mut renderer = DeckRenderer::new(FailingProvider {
            queries: queries.clone(),
        });
        let deck = renderer.build(&outline());

        assert_eq!(deck.slide_count(), 5);
        assert_eq!(deck.title(), "Deck");
        assert!(deck.media().is_empty());
        assert_eq!(*queries.borrow(), vec!["Odd".to_string(), "sea".to_string()]);
    }

    #[test]
    fn test_slide_dispatch() {
        let mut renderer = DeckRenderer::new(FailingProvider {
            queries: Rc::default(),
        });
        let deck = renderer.build(&outline());
        let layouts: Vec<_> = deck.slides().iter().map(|s| s.layout()).collect();
        assert_eq!(
            layouts,
            vec![
                SlideLayout::Title,
                SlideLayout::Blank,
                SlideLayout::Blank,
                SlideLayout::Blank,
                SlideLayout::Title,
            ]
        );

        // The section slide has no subtitle shape.
        assert_eq!(deck.slides()[4].shapes().len(), 1);
    }

    #[test]
    fn test_body_width_follows_image_rule() {
        let mut renderer = DeckRenderer::new(FailingProvider {
            queries: Rc::default(),
        });
        let layout = renderer.layout().clone();
        let deck = renderer.build(&outline());

        let body_width = |slide: &Slide| match &slide.shapes()[1] {
            Shape::Text(t) => t.frame.map(|f| f.width),
            Shape::Picture(_) => None,
        };
        assert_eq!(body_width(&deck.slides()[1]), Some(layout.text_zone_width(true)));
        assert_eq!(body_width(&deck.slides()[2]), Some(layout.text_zone_width(false)));
    }

    #[test]
    fn test_strategies() {
        let bullets = vec!["one".to_string(), "two".to_string()];
        let frame = Rect::new(1, 2, 3, 4);

        let custom = CustomTextFrame.body_shape(&bullets, frame);
        assert_eq!(custom.placeholder, None);
        assert_eq!(custom.paragraphs.len(), 2);
        assert_eq!(custom.paragraphs[0].size_pt, Some(18.0));
        assert_eq!(custom.paragraphs[0].space_before_pt, Some(8.0));

        let native = NativePlaceholder.body_shape(&bullets, frame);
        assert_eq!(native.placeholder, Some(Placeholder::Body));
        assert_eq!(native.frame, Some(frame));
        assert_eq!(native.paragraphs[1].font.as_deref(), Some("Calibri"));
        assert_eq!(native.paragraphs[1].space_after_pt, Some(6.0));
        assert_eq!(NativePlaceholder.layout(), SlideLayout::TitleAndContent);
    }
}
