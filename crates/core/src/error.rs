//! Error types for outline generation and deck rendering.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating an outline or rendering a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a local file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A required credential was not present in the environment.
    #[error("Missing credential: {0} environment variable is required")]
    MissingCredential(&'static str),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// A remote service answered with a non-success status.
    #[error("Service error ({status}): {body}")]
    ServiceError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The text-generation response could not be parsed as a slide array.
    #[error("Outline parse error: {0}")]
    ParseError(String),

    /// The text-generation response parsed but held no slides.
    #[error("Outline is empty")]
    EmptyOutline,

    /// Image search, download, decode or encode failed.
    #[error("Image error: {0}")]
    ImageError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML reading or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid or corrupted deck file.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}
