//! Error types for sammelband.
//!
//! All fallible operations return [`Result`]. Two rules hold throughout:
//!
//! **System errors bubble up unchanged:**
//! - `SammelbandError::Io` (from `std::io::Error`) - file system errors,
//!   permission errors. These indicate real system problems and are never
//!   wrapped or suppressed.
//!
//! **Application errors are wrapped with context:**
//! - `ImageDecode` - an uploaded image could not be decoded
//! - `Parsing` - a source PDF is structurally invalid
//! - `Validation` - missing or empty input where input is required
//!
//! A failure in either pipeline aborts the whole request; there is no
//! partial output and no retry.

use thiserror::Error;

/// Result type alias using `SammelbandError`.
pub type Result<T> = std::result::Result<T, SammelbandError>;

/// Main error type for all sammelband operations.
#[derive(Debug, Error)]
pub enum SammelbandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {message}")]
    ImageDecode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{0}")]
    Other(String),
}

impl SammelbandError {
    /// Create a validation error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        SammelbandError::Validation {
            message: message.into(),
        }
    }

    /// Create a parsing error without an underlying source.
    pub fn parsing(message: impl Into<String>) -> Self {
        SammelbandError::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create an image decode error without an underlying source.
    pub fn image_decode(message: impl Into<String>) -> Self {
        SammelbandError::ImageDecode {
            message: message.into(),
            source: None,
        }
    }
}

impl From<image::ImageError> for SammelbandError {
    fn from(err: image::ImageError) -> Self {
        SammelbandError::ImageDecode {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
