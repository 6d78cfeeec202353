//! The seams between the handlers and the outside world
//!
//! - [`TextMeasurer`] - How wide a run of text is at a given font
//! - [`FontFetcher`] - Where font bytes come from
//! - [`FilePicker`] - How the user chooses a file
//! - [`AssetStore`] - Where uploaded files end up
//!
//! Production implementations live in the handler crates; tests swap in
//! fakes so no handler needs a network, a display or a real font.

use crate::{error::Result, messages::FontWeight};
use futures::future::BoxFuture;

/// A font as the measurer sees it: family, weight and pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub weight: FontWeight,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, weight: FontWeight, size: f32) -> Self {
        Self {
            family: family.into(),
            weight,
            size,
        }
    }

    /// Same family and weight at another size
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

/// Measures rendered text width in pixels
pub trait TextMeasurer: Send + Sync {
    /// Identify yourself in logs
    fn name(&self) -> &'static str;

    /// Horizontal advance of `text` set on one line in `font`
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Loads raw font bytes from a URL or path
pub trait FontFetcher: Send + Sync {
    fn fetch<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<Vec<u8>>>;
}

/// A file the user picked
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Native file selection
pub trait FilePicker: Send + Sync {
    /// Lets the user choose one file restricted to `accept_types`.
    ///
    /// `Ok(None)` means the user cancelled.
    fn pick<'a>(&'a self, accept_types: &'a [String]) -> BoxFuture<'a, Result<Option<PickedFile>>>;
}

/// Remote store that accepts idempotent PUTs
pub trait AssetStore: Send + Sync {
    /// Stores `body` at `path`; any non-success status is an error
    fn put<'a>(
        &'a self,
        path: &'a str,
        content_type: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<()>>;
}
