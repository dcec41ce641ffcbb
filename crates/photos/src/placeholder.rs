//! Solid-color stand-in image used when no photo can be fetched.

use deckgen_core::{Error, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Placeholder width in pixels.
pub const PLACEHOLDER_WIDTH: u32 = 1200;

/// Placeholder height in pixels.
pub const PLACEHOLDER_HEIGHT: u32 = 800;

/// Light blue (#E3F2FD).
pub const PLACEHOLDER_COLOR: [u8; 3] = [0xE3, 0xF2, 0xFD];

/// Encode the placeholder as PNG bytes.
pub fn placeholder_png() -> Result<Vec<u8>> {
    let img = RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, Rgb(PLACEHOLDER_COLOR));

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::ImageError(format!("Failed to encode placeholder: {}", e)))?;

    Ok(out.into_inner())
}
