//! PPTX (Office Open XML) deck model, writer, reader, and outline renderer.
//!
//! Decks are ZIP archives of XML parts. [`Deck`] builds one in memory,
//! [`DeckReader`] reads one back, and [`DeckRenderer`] turns an outline into
//! a deck.

pub mod deck;
pub mod reader;
pub mod render;
mod templates;
mod writer;

pub use deck::{Alignment, Deck, MediaId, Paragraph, Placeholder, Slide, SlideLayout, TextShape};
pub use reader::{DeckReader, DeckSummary, SlideSummary};
pub use render::{BulletStrategy, BulletStyle, CustomTextFrame, DeckRenderer, NativePlaceholder};
