//! Content type detection for picked files

use image::ImageFormat;

/// Types the asset store accepts
pub const ALLOWED_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

const UNKNOWN: &str = "application/octet-stream";

/// MIME type of `bytes`, from the magic number if recognisable and from
/// the extension of `name` otherwise
pub fn detect(bytes: &[u8], name: &str) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }
    ImageFormat::from_path(name)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub fn is_allowed(mime: &str) -> bool {
    ALLOWED_TYPES.contains(&mime)
}

/// Glob patterns (`*.png`) for a list of accept types
///
/// Entries may be extensions (`.png`), exact MIME types (`image/png`) or
/// `image/*`; anything else is skipped.
pub fn accept_patterns(accept_types: &[String]) -> Vec<String> {
    let mut patterns = Vec::new();
    for accept in accept_types {
        let accept = accept.trim();
        let extensions: Vec<&str> = if let Some(ext) = accept.strip_prefix('.') {
            vec![ext]
        } else if accept == "image/*" {
            ALLOWED_TYPES
                .iter()
                .filter_map(|m| ImageFormat::from_mime_type(m))
                .flat_map(|f| f.extensions_str().iter().copied())
                .collect()
        } else {
            ImageFormat::from_mime_type(accept)
                .map(|f| f.extensions_str().to_vec())
                .unwrap_or_default()
        };
        for ext in extensions {
            let pattern = format!("*.{}", ext.to_ascii_lowercase());
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
    }
    patterns
}
