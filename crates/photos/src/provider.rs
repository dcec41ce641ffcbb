//! [`ImageProvider`] implementations backed by a single scratch file.

use crate::pexels::PexelsClient;
use crate::placeholder::placeholder_png;
use deckgen_core::{ImageProvider, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default scratch file for downloaded images, unique per process.
pub fn default_scratch_path() -> PathBuf {
    std::env::temp_dir().join(format!("deckgen-{}-image", std::process::id()))
}

/// Fetches photos from Pexels and falls back to the placeholder on any failure.
pub struct PexelsImageProvider {
    client: PexelsClient,
    scratch_path: PathBuf,
}

impl PexelsImageProvider {
    pub fn new(client: PexelsClient) -> Self {
        Self {
            client,
            scratch_path: default_scratch_path(),
        }
    }

    /// Write images to `path` instead of the default scratch file.
    pub fn with_scratch_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_path = path.into();
        self
    }
}

impl ImageProvider for PexelsImageProvider {
    fn acquire(&mut self, query: &str) -> Result<PathBuf> {
        let bytes = match self.client.fetch(query) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Using placeholder image for '{}': {}", query, e);
                placeholder_png()?
            }
        };

        write_scratch(&self.scratch_path, &bytes)
    }
}

/// Always supplies the placeholder; used when photo search is disabled.
pub struct PlaceholderImageProvider {
    scratch_path: PathBuf,
}

impl Default for PlaceholderImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderImageProvider {
    pub fn new() -> Self {
        Self {
            scratch_path: default_scratch_path(),
        }
    }

    /// Write images to `path` instead of the default scratch file.
    pub fn with_scratch_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_path = path.into();
        self
    }
}

impl ImageProvider for PlaceholderImageProvider {
    fn acquire(&mut self, query: &str) -> Result<PathBuf> {
        log::debug!("Placeholder image for '{}'", query);
        write_scratch(&self.scratch_path, &placeholder_png()?)
    }
}

fn write_scratch(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    fs::write(path, bytes)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};

    #[test]
    fn test_placeholder_provider_writes_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("img");
        let mut provider = PlaceholderImageProvider::new().with_scratch_path(&scratch);

        let path = provider.acquire("anything").unwrap();
        assert_eq!(path, scratch);

        let img = image::load_from_memory(&fs::read(&path).unwrap()).unwrap();
        assert_eq!((img.width(), img.height()), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
    }

    #[test]
    fn test_unreachable_service_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("img");
        let client = PexelsClient::new("key")
            .unwrap()
            .with_endpoint("http://127.0.0.1:1/v1/search");
        let mut provider = PexelsImageProvider::new(client).with_scratch_path(&scratch);

        let path = provider.acquire("mountains").unwrap();
        let bytes = fs::read(path).unwrap();
        assert_eq!(bytes, placeholder_png().unwrap());
    }

    #[test]
    fn test_default_scratch_path_in_temp_dir() {
        assert!(default_scratch_path().starts_with(std::env::temp_dir()));
    }
}
