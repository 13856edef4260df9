//! Error types for the storefront and the asset converter

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
///
/// Pages never see this directly: the catalog client folds it into an
/// [`Envelope::Failure`](crate::api::Envelope) at its boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
        /// The environment key that caused the error (e.g. "CATALOG_API_URL")
        key: Option<String>,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A URL could not be parsed or extended
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body was not the JSON we expected
    #[error("malformed response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// libwebp rejected the image
    #[error("webp encoding failed: {0}")]
    WebP(String),

    /// External tool execution failed (ffmpeg)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Two sources would write the same output file
    #[error("{output} is already produced by {claimed_by}")]
    OutputCollision { output: String, claimed_by: String },

    /// Operation not supported (missing binary, unknown format, ...)
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Shorthand for a configuration error tied to an environment key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Io(std::io::Error::other(format!("task join error: {}", e)))
    }
}
