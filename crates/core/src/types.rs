//! Domain types for representing a slide-deck outline.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// The role a slide plays in the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum SlideType {
    /// Opening slide with a large centered title and optional subtitle.
    Title,
    /// Title plus bullet points.
    #[default]
    Content,
    /// Content slide whose bullets are meant to sit beside a photo.
    ImageFocus,
    /// Closing slide with takeaways.
    Conclusion,
}

impl SlideType {
    /// Tag used in the outline JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::ImageFocus => "image_focus",
            Self::Conclusion => "conclusion",
        }
    }
}

impl From<Option<String>> for SlideType {
    /// Unknown and missing tags fall back to [`SlideType::Content`].
    fn from(tag: Option<String>) -> Self {
        match tag.as_deref().map(str::trim) {
            Some("title") => Self::Title,
            Some("image_focus") => Self::ImageFocus,
            Some("conclusion") => Self::Conclusion,
            _ => Self::Content,
        }
    }
}

impl std::fmt::Display for SlideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an outline: everything needed to render a single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    /// Slide title.
    pub title: String,

    /// Subtitle, only shown on title slides.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtitle: String,

    /// Newline-delimited bullet sentences.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,

    /// Rendering branch for this slide.
    #[serde(default)]
    pub slide_type: SlideType,

    /// Photo search term. Empty means no explicit image request.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_query: String,
}

impl SlideDescriptor {
    /// Create a descriptor with the given title and type and no other content.
    pub fn new(title: impl Into<String>, slide_type: SlideType) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            content: String::new(),
            slide_type,
            image_query: String::new(),
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the newline-delimited bullet content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the photo search term.
    pub fn with_image_query(mut self, query: impl Into<String>) -> Self {
        self.image_query = query.into();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated, non-empty sequence of slide descriptors.
///
/// The first slide is always a title slide and the length never exceeds the
/// slide count requested at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outline(Vec<SlideDescriptor>);

impl Outline {
    /// Build an outline from raw descriptors.
    ///
    /// Truncates to `max_slides` (at least one) and forces the first
    /// descriptor to [`SlideType::Title`]. Fails if no descriptors remain.
    pub fn new(mut slides: Vec<SlideDescriptor>, max_slides: usize) -> Result<Self> {
        slides.truncate(max_slides.max(1));

        let first = slides.first_mut().ok_or(Error::EmptyOutline)?;
        if first.slide_type != SlideType::Title {
            log::debug!(
                "Coercing first slide '{}' from {} to title",
                first.title,
                first.slide_type
            );
            first.slide_type = SlideType::Title;
        }

        Ok(Self(slides))
    }

    /// Parse a JSON array of descriptors and validate it.
    pub fn from_json(json: &str, max_slides: usize) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::ParseError(e.to_string()))?;

        if !value.is_array() {
            return Err(Error::ParseError(
                "Response must be a JSON array".to_string(),
            ));
        }

        let slides: Vec<SlideDescriptor> =
            serde_json::from_value(value).map_err(|e| Error::ParseError(e.to_string()))?;

        Self::new(slides, max_slides)
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[SlideDescriptor] {
        &self.0
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the slides.
    pub fn iter(&self) -> std::slice::Iter<'_, SlideDescriptor> {
        self.0.iter()
    }

    /// Serialize as a pretty-printed JSON array.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(|e| Error::ParseError(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a SlideDescriptor;
    type IntoIter = std::slice::Iter<'a, SlideDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
