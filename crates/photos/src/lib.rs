//! Stock-photo search with a solid-color placeholder fallback.

pub mod pexels;
pub mod placeholder;
pub mod provider;

pub use pexels::PexelsClient;
pub use placeholder::placeholder_png;
pub use provider::{PexelsImageProvider, PlaceholderImageProvider};
