//! Pexels photo search.
//!
//! Two blocking calls per photo: a search for a single landscape result,
//! then a download of its "large" rendition.

use deckgen_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Pexels search endpoint.
pub const PEXELS_SEARCH_ENDPOINT: &str = "https://api.pexels.com/v1/search";

/// Timeout applied to both the search and the download.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large: String,
}

/// Blocking client for the Pexels search API.
pub struct PexelsClient {
    client: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

impl PexelsClient {
    /// Create a client whose requests time out after [`REQUEST_TIMEOUT`].
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: PEXELS_SEARCH_ENDPOINT.to_string(),
        })
    }

    /// Point the client at a different search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// URL of the large rendition of the first landscape result for `query`.
    pub fn search(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", "1"),
                ("orientation", "landscape"),
            ])
            .send()
            .map_err(|e| Error::HttpError(e.to_string()))?;

        let body = check_status(response)?
            .text()
            .map_err(|e| Error::HttpError(e.to_string()))?;

        first_large_url(&body, query)
    }

    /// Download raw bytes from `url`.
    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::HttpError(e.to_string()))?;

        let bytes = check_status(response)?
            .bytes()
            .map_err(|e| Error::HttpError(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    /// Search, download, and check that the bytes decode as an image.
    pub fn fetch(&self, query: &str) -> Result<Vec<u8>> {
        let url = self.search(query)?;
        log::debug!("Downloading photo for '{}': {}", query, url);

        let bytes = self.download(&url)?;
        image::load_from_memory(&bytes)
            .map_err(|e| Error::ImageError(format!("Downloaded photo does not decode: {}", e)))?;

        Ok(bytes)
    }
}

fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().unwrap_or_default();
        Err(Error::ServiceError {
            status: status.as_u16(),
            body,
        })
    }
}

fn first_large_url(body: &str, query: &str) -> Result<String> {
    let parsed: SearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::ImageError(format!("Malformed search response: {}", e)))?;

    parsed
        .photos
        .into_iter()
        .next()
        .map(|photo| photo.src.large)
        .ok_or_else(|| Error::ImageError(format!("No images found for '{}'", query)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_large_url() {
        let body = r#"{
            "page": 1,
            "per_page": 1,
            "photos": [{
                "id": 42,
                "src": {"original": "https://x/o.jpg", "large": "https://x/l.jpg"}
            }]
        }"#;
        assert_eq!(first_large_url(body, "sea").unwrap(), "https://x/l.jpg");
    }

    #[test]
    fn test_no_photos() {
        let err = first_large_url(r#"{"photos": []}"#, "nothing").unwrap_err();
        assert!(err.to_string().contains("No images found for 'nothing'"));

        assert!(first_large_url("{}", "nothing").is_err());
    }

    #[test]
    fn test_malformed_search_response() {
        assert!(matches!(
            first_large_url("<html>", "sea"),
            Err(Error::ImageError(_))
        ));
    }
}
