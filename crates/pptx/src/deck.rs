//! In-memory deck object model.
//!
//! A [`Deck`] holds slides in presentation order plus the image bytes they
//! reference. Slides are only ever appended.

use deckgen_core::{Error, LayoutConfig, Rect, Result};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Slide layouts shipped in the package's single master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    /// Centered title and subtitle placeholders.
    Title,
    /// Title placeholder plus a bulleted body placeholder.
    TitleAndContent,
    /// No placeholders.
    Blank,
}

impl SlideLayout {
    /// All layouts, in part-number order.
    pub const ALL: [SlideLayout; 3] = [Self::Title, Self::TitleAndContent, Self::Blank];

    /// 1-based number of the `slideLayoutN.xml` part.
    pub fn part_number(&self) -> usize {
        match self {
            Self::Title => 1,
            Self::TitleAndContent => 2,
            Self::Blank => 3,
        }
    }

    /// Name shown in PowerPoint's layout gallery.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::Blank => "Blank",
        }
    }
}

/// Which layout placeholder a text shape fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    CenteredTitle,
    Subtitle,
    Title,
    Body,
}

impl Placeholder {
    /// `type` attribute of `<p:ph>`; the body placeholder has none.
    pub fn ph_type(&self) -> Option<&'static str> {
        match self {
            Self::CenteredTitle => Some("ctrTitle"),
            Self::Subtitle => Some("subTitle"),
            Self::Title => Some("title"),
            Self::Body => None,
        }
    }

    /// `idx` attribute of `<p:ph>`; titles have none.
    pub fn ph_idx(&self) -> Option<&'static str> {
        match self {
            Self::Subtitle | Self::Body => Some("1"),
            Self::CenteredTitle | Self::Title => None,
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// One paragraph with a single formatted run.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size_pt: Option<f64>,
    pub bold: bool,
    /// RGB text color.
    pub color: Option<[u8; 3]>,
    pub font: Option<String>,
    pub alignment: Option<Alignment>,
    pub space_before_pt: Option<f64>,
    pub space_after_pt: Option<f64>,
    /// Line spacing as a multiple of single spacing.
    pub line_spacing: Option<f64>,
    pub level: u8,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size_pt: None,
            bold: false,
            color: None,
            font: None,
            alignment: None,
            space_before_pt: None,
            space_after_pt: None,
            line_spacing: None,
            level: 0,
        }
    }

    pub fn size(mut self, pt: f64) -> Self {
        self.size_pt = Some(pt);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, rgb: [u8; 3]) -> Self {
        self.color = Some(rgb);
        self
    }

    pub fn font(mut self, typeface: impl Into<String>) -> Self {
        self.font = Some(typeface.into());
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn spacing(mut self, before_pt: Option<f64>, after_pt: Option<f64>) -> Self {
        self.space_before_pt = before_pt;
        self.space_after_pt = after_pt;
        self
    }

    pub fn line_spacing(mut self, multiple: f64) -> Self {
        self.line_spacing = Some(multiple);
        self
    }
}

/// A text box or a filled layout placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub name: String,
    /// Set when the shape fills a layout placeholder.
    pub placeholder: Option<Placeholder>,
    /// Explicit position; placeholders inherit the layout's when `None`.
    pub frame: Option<Rect>,
    pub word_wrap: bool,
    pub paragraphs: Vec<Paragraph>,
}

impl TextShape {
    /// A free-floating text box at `frame`.
    pub fn text_box(name: impl Into<String>, frame: Rect) -> Self {
        Self {
            name: name.into(),
            placeholder: None,
            frame: Some(frame),
            word_wrap: true,
            paragraphs: Vec::new(),
        }
    }

    /// A shape filling `placeholder`, positioned by the layout.
    pub fn placeholder(name: impl Into<String>, placeholder: Placeholder) -> Self {
        Self {
            name: name.into(),
            placeholder: Some(placeholder),
            frame: None,
            word_wrap: true,
            paragraphs: Vec::new(),
        }
    }

    /// Override the placeholder's inherited position.
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }
}

/// Index of an image in the deck's media store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaId(pub(crate) usize);

/// A picture shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub media: MediaId,
    pub frame: Rect,
    /// Alt text.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text(TextShape),
    Picture(Picture),
}

/// One slide: a layout plus its shapes in z-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    layout: SlideLayout,
    shapes: Vec<Shape>,
}

impl Slide {
    pub fn new(layout: SlideLayout) -> Self {
        Self {
            layout,
            shapes: Vec::new(),
        }
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn add_text(&mut self, shape: TextShape) {
        self.shapes.push(Shape::Text(shape));
    }

    pub fn add_picture(&mut self, media: MediaId, frame: Rect, description: impl Into<String>) {
        self.shapes.push(Shape::Picture(Picture {
            media,
            frame,
            description: description.into(),
        }));
    }

    /// Text shapes on this slide.
    pub fn text_shapes(&self) -> impl Iterator<Item = &TextShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            Shape::Picture(_) => None,
        })
    }

    /// Picture shapes on this slide.
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Picture(p) => Some(p),
            Shape::Text(_) => None,
        })
    }
}

/// Image encodings the writer can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Detect the encoding from magic bytes.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Png) => Ok(Self::Png),
            Ok(image::ImageFormat::Jpeg) => Ok(Self::Jpeg),
            Ok(other) => Err(Error::ImageError(format!(
                "Unsupported image format: {:?}",
                other
            ))),
            Err(e) => Err(Error::ImageError(format!("Unrecognized image data: {}", e))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Embedded image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

/// A whole presentation held in memory until [`Deck::save`].
#[derive(Debug, Clone)]
pub struct Deck {
    /// Slide width in EMUs.
    width: i64,
    /// Slide height in EMUs.
    height: i64,
    /// Document title for the core properties.
    title: String,
    slides: Vec<Slide>,
    media: Vec<Media>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl Deck {
    /// Create an empty deck sized by `layout`.
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            width: layout.slide_width,
            height: layout.slide_height,
            title: String::new(),
            slides: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Append a slide.
    pub fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Store image bytes and return a handle for [`Slide::add_picture`].
    pub fn add_media(&mut self, bytes: Vec<u8>) -> Result<MediaId> {
        let kind = ImageKind::detect(&bytes)?;
        self.media.push(Media { kind, bytes });
        Ok(MediaId(self.media.len() - 1))
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub(crate) fn media_item(&self, id: MediaId) -> Result<&Media> {
        self.media
            .get(id.0)
            .ok_or_else(|| Error::CorruptedFile(format!("Picture references missing media #{}", id.0)))
    }

    /// Serialize the deck to a `.pptx` file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        crate::writer::write_package(self, BufWriter::new(file))?;
        log::debug!("Wrote {} slides to {}", self.slides.len(), path.display());
        Ok(())
    }

    /// Serialize the deck to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        crate::writer::write_package(self, &mut out)?;
        Ok(out.into_inner())
    }
}
