//! Core domain types, bullet normalization, and slide layout geometry
//! for outline-driven deck generation.

pub mod bullets;
pub mod error;
pub mod image;
pub mod layout;
pub mod summary;
pub mod types;

pub use bullets::BulletNormalizer;
pub use error::{Error, Result};
pub use image::ImageProvider;
pub use layout::{LayoutConfig, Rect};
pub use summary::OutlineSummary;
pub use types::{Outline, SlideDescriptor, SlideType};
