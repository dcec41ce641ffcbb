//! Seam between the deck renderer and wherever illustrative images come from.

use crate::Result;
use std::path::PathBuf;

/// Supplies a local image file for a search query.
///
/// Implementations write the image to a scratch path and return it. The
/// caller owns the file from then on and deletes it after use. A provider
/// should fall back to a placeholder rather than fail; an `Err` means not
/// even the placeholder could be written.
pub trait ImageProvider {
    fn acquire(&mut self, query: &str) -> Result<PathBuf>;
}

impl<P: ImageProvider + ?Sized> ImageProvider for &mut P {
    fn acquire(&mut self, query: &str) -> Result<PathBuf> {
        (**self).acquire(query)
    }
}

impl<P: ImageProvider + ?Sized> ImageProvider for Box<P> {
    fn acquire(&mut self, query: &str) -> Result<PathBuf> {
        (**self).acquire(query)
    }
}
