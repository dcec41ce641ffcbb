//! Renders outlines to real `.pptx` files and reads them back.

use deckgen_core::bullets::starts_with_glyph;
use deckgen_core::{LayoutConfig, Outline, SlideDescriptor, SlideType};
use deckgen_outline::fallback_outline;
use deckgen_photos::PlaceholderImageProvider;
use deckgen_pptx::{BulletStyle, DeckReader, DeckRenderer, DeckSummary};
use std::fs::File;
use std::path::Path;

fn read_deck(path: &Path) -> DeckSummary {
    DeckReader::new().read(File::open(path).unwrap()).unwrap()
}

fn renderer(dir: &Path, style: BulletStyle) -> DeckRenderer<PlaceholderImageProvider> {
    DeckRenderer::new(PlaceholderImageProvider::new().with_scratch_path(dir.join("scratch")))
        .with_bullet_style(style)
}

#[test]
fn test_fallback_outline_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("testing.pptx");
    let outline = fallback_outline("Testing", 5);

    let written = renderer(dir.path(), BulletStyle::Custom)
        .render(&outline, &output)
        .unwrap();
    assert_eq!(written, output);

    let summary = read_deck(&output);
    assert_eq!(summary.slide_count(), 5);
    assert_eq!(summary.title.as_deref(), Some("Testing"));
    assert_eq!(summary.width, 9_144_000);
    assert_eq!(summary.height, 6_858_000);

    let titles: Vec<_> = summary
        .slides
        .iter()
        .map(|s| s.title().unwrap_or_default())
        .collect();
    assert_eq!(
        titles,
        vec!["Testing", "Introduction", "Key Points", "Applications", "Conclusion"]
    );

    assert_eq!(summary.slides[0].layout.as_deref(), Some("Title Slide"));
    assert_eq!(summary.slides[0].body(), vec!["A Comprehensive Overview"]);
    for slide in &summary.slides[1..] {
        assert_eq!(slide.layout.as_deref(), Some("Blank"));
    }
}

#[test]
fn test_bullets_match_content_lines_without_glyphs() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("bullets.pptx");
    let outline = Outline::new(
        vec![
            SlideDescriptor::new("Glyphs", SlideType::Title),
            SlideDescriptor::new("Points", SlideType::Content)
                .with_content("• First\n- Second\n\n* Third\\n→ Fourth\n•"),
        ],
        5,
    )
    .unwrap();

    renderer(dir.path(), BulletStyle::Custom)
        .render(&outline, &output)
        .unwrap();

    let summary = read_deck(&output);
    let body = summary.slides[1].body();
    assert_eq!(body, vec!["First", "Second", "Third", "Fourth"]);
    assert!(body.iter().all(|line| !starts_with_glyph(line)));
}

#[test]
fn test_odd_slide_without_query_gets_picture() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("pictures.pptx");
    let outline = Outline::new(
        vec![
            SlideDescriptor::new("Cover", SlideType::Title),
            SlideDescriptor::new("Odd", SlideType::Content).with_content("a"),
            SlideDescriptor::new("Even", SlideType::Content).with_content("b"),
        ],
        5,
    )
    .unwrap();

    let mut renderer = renderer(dir.path(), BulletStyle::Custom);
    let layout = renderer.layout().clone();
    renderer.render(&outline, &output).unwrap();

    let summary = read_deck(&output);
    assert_eq!(summary.slides[1].pictures.len(), 1);
    assert!(summary.slides[2].pictures.is_empty());

    let picture = &summary.slides[1].pictures[0];
    assert_eq!(picture.target.as_deref(), Some("ppt/media/image1.png"));
    assert_eq!(picture.description, "Odd");
    // 1200x800 placeholder scaled to the image zone.
    assert_eq!(picture.frame, Some(layout.picture_frame(1200, 800)));

    assert!(!dir.path().join("scratch").exists());
}

#[test]
fn test_native_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("native.pptx");
    let outline = fallback_outline("Rust", 3);

    let layout = LayoutConfig::new().with_text_zone_ratio(0.6);
    renderer(dir.path(), BulletStyle::Native)
        .with_layout(layout.clone())
        .render(&outline, &output)
        .unwrap();

    let summary = read_deck(&output);
    assert_eq!(summary.slide_count(), 3);

    let slide = &summary.slides[1];
    assert_eq!(slide.layout.as_deref(), Some("Title and Content"));
    assert_eq!(slide.title().as_deref(), Some("Introduction"));
    assert_eq!(slide.body().len(), 3);

    let body = slide
        .text_frames
        .iter()
        .find(|f| f.placeholder.as_deref() == Some("body"))
        .unwrap();
    assert_eq!(body.frame, Some(layout.body_frame(true)));
    assert_eq!(slide.pictures.len(), 1);
}

#[test]
fn test_slide_count_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("one.pptx");

    renderer(dir.path(), BulletStyle::Custom)
        .render(&fallback_outline("Short", 1), &output)
        .unwrap();

    let summary = read_deck(&output);
    assert_eq!(summary.slide_count(), 1);
    assert_eq!(summary.slides[0].title().as_deref(), Some("Short"));
}
