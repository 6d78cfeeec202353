//! Rasterization of mounted label documents
//!
//! The label preview is a live vector document. Printing needs pixels: a
//! PNG at the printer's exact resolution, turned a quarter when the label
//! feeds sideways. [`Rasterizer::rasterize`] produces that PNG from a
//! snapshot of the mounted document.
//!
//! The pipeline:
//!
//! 1. Yield once so the latest UI update lands in the document store
//! 2. Clone the mounted markup (the live document is never touched)
//! 3. Wait for the label fonts and embed them as `@font-face` rules
//! 4. Give the root an explicit size and the SVG namespace
//! 5. Serialize to a base64 `data:` URL and decode it as an image
//! 6. Stretch it onto a white canvas, rotating if asked
//! 7. Encode as a `data:image/png;base64,` URL
//!
//! Every failure along the way becomes the `error` field of the result;
//! [`Rasterizer::rasterize`] itself never fails.

use std::sync::Arc;

use labelhost_core::{
    error::Result,
    messages::{RasterRequest, RasterResult},
    DocumentStore, HostError,
};
use labelhost_fontdb::FontLoader;
use parking_lot::Mutex;

pub mod canvas;
pub mod prepare;

pub use canvas::{render, png_data_url};
pub use prepare::{normalize_root, svg_data_url};

/// Turns mounted documents into PNG data URLs
pub struct Rasterizer {
    documents: Arc<Mutex<DocumentStore>>,
    fonts: Arc<FontLoader>,
}

impl Rasterizer {
    pub fn new(documents: Arc<Mutex<DocumentStore>>, fonts: Arc<FontLoader>) -> Self {
        Self { documents, fonts }
    }

    /// Rasterizes the element named in `req`
    pub async fn rasterize(&self, req: &RasterRequest) -> RasterResult {
        match self.try_rasterize(req).await {
            Ok(data_url) => {
                log::debug!(
                    "Rasterized '{}' at {}x{} (rotate: {})",
                    req.source_element_id,
                    req.width,
                    req.height,
                    req.rotate
                );
                RasterResult::success(req.request_id.clone(), data_url)
            },
            Err(e) => {
                log::warn!("Rasterizing '{}' failed: {}", req.source_element_id, e);
                RasterResult::failure(req.request_id.clone(), e.to_string())
            },
        }
    }

    async fn try_rasterize(&self, req: &RasterRequest) -> Result<String> {
        tokio::task::yield_now().await;

        let svg = self
            .documents
            .lock()
            .clone_svg(&req.source_element_id)
            .ok_or_else(|| HostError::ElementNotFound(req.source_element_id.clone()))?;

        let fonts = self.fonts.ensure_fonts_loaded().await?;
        let svg = fonts.embed_into(&svg)?;
        let svg = normalize_root(&svg, req.width, req.height)?;
        let source = svg_data_url(&svg);

        let options = canvas::decode_options(Some(&fonts));
        let tree = canvas::decode_svg_source(&source, &options)?;
        let pixmap = render(&tree, req.width, req.height, req.rotate)?;
        png_data_url(&pixmap)
    }
}
