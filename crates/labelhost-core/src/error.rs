//! Error types for labelhost
//!
//! Every handler converts these into the human-readable `error` field of its
//! response, so the `Display` text is part of the wire contract.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

/// Main error type for labelhost
#[derive(Debug, Error)]
pub enum HostError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error(transparent)]
    FontLoad(#[from] FontLoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Font fetch and registration errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font fetch failed for {source_url}: {reason}")]
    FetchFailed { source_url: String, reason: String },

    #[error("Font fetch failed for {source_url}: HTTP {status}")]
    HttpStatus { source_url: String, status: u16 },

    #[error("Invalid font data from {0}")]
    InvalidData(String),
}

/// Rasterization errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to prepare SVG: {0}")]
    Prepare(String),

    #[error("failed to load source as image")]
    Decode,

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// File selection and upload errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File too large: {size_kb} KB exceeds {limit_kb} KB limit")]
    TooLarge { size_kb: u64, limit_kb: u64 },

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File picker failed: {0}")]
    Picker(String),

    #[error("Upload failed: HTTP {0}")]
    HttpStatus(u16),

    #[error("Upload failed: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_wire_text() {
        let err: HostError = RenderError::Decode.into();
        assert_eq!(err.to_string(), "failed to load source as image");

        let err = HostError::ElementNotFound("label-svg".into());
        assert_eq!(err.to_string(), "element not found: label-svg");

        let err: HostError = UploadError::TooLarge {
            size_kb: 5000,
            limit_kb: 4000,
        }
        .into();
        assert_eq!(err.to_string(), "File too large: 5000 KB exceeds 4000 KB limit");
    }
}
