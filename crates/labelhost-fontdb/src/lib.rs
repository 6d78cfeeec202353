//! Font loading for labelhost: fetch once, embed everywhere
//!
//! The label font is needed in three places: measuring text for wrapping,
//! drawing text during rasterization, and inside serialized SVG documents
//! that must render without network access. [`FontLoader`] fetches the
//! regular and bold faces once, keeps them as `data:` URLs for embedding,
//! and registers their bytes for the measurer and the rasterizer.
//!
//! ## Memoization
//!
//! The first successful load is cached for the life of the process. Callers
//! that arrive while a load is in flight start their own fetch; whichever
//! finishes first fills the cache and later results are discarded. Failures
//! are never cached, so the next call tries again.

use std::sync::Arc;

use base64::Engine;
use futures::future::try_join;
use parking_lot::Mutex;

use labelhost_core::{error::Result, FontFetcher, FontSources, FontWeight};

pub mod embed;
pub mod fetch;
pub mod measure;
pub mod registry;

pub use embed::{embed_fonts_in_svg, font_face_css};
pub use fetch::HttpFontFetcher;
pub use measure::{ApproxMeasurer, FaceMeasurer};
pub use registry::{FontFormat, FontRegistry, RegisteredFace};

/// One face as an embeddable `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAsset {
    pub data_url: String,
    pub format: FontFormat,
}

impl FontAsset {
    pub fn from_bytes(data: &[u8]) -> Self {
        let format = FontFormat::sniff(data);
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        Self {
            data_url: format!("data:{};base64,{}", format.mime_type(), encoded),
            format,
        }
    }
}

/// Both weights of the label font, ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAssetPair {
    pub regular: FontAsset,
    pub bold: FontAsset,
}

/// Everything one successful load produces
#[derive(Debug)]
pub struct LoadedFonts {
    family: String,
    assets: FontAssetPair,
    registry: FontRegistry,
}

impl LoadedFonts {
    /// Validates both faces and registers them at weights 400 and 700
    pub fn from_bytes(sources: &FontSources, regular: Vec<u8>, bold: Vec<u8>) -> Result<Self> {
        let assets = FontAssetPair {
            regular: FontAsset::from_bytes(&regular),
            bold: FontAsset::from_bytes(&bold),
        };

        let mut registry = FontRegistry::new();
        registry.add(RegisteredFace::new(
            &sources.family,
            FontWeight::REGULAR,
            regular,
            &sources.regular,
        )?);
        registry.add(RegisteredFace::new(
            &sources.family,
            FontWeight::BOLD,
            bold,
            &sources.bold,
        )?);

        Ok(Self {
            family: sources.family.clone(),
            assets,
            registry,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn assets(&self) -> &FontAssetPair {
        &self.assets
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Embeds both faces into `svg`, see [`embed_fonts_in_svg`]
    pub fn embed_into(&self, svg: &str) -> Result<String> {
        embed_fonts_in_svg(svg, &self.family, &self.assets)
    }
}

/// Fetches the label font once and hands out the cached result
pub struct FontLoader {
    sources: FontSources,
    fetcher: Arc<dyn FontFetcher>,
    cache: Mutex<Option<Arc<LoadedFonts>>>,
}

impl FontLoader {
    pub fn new(sources: FontSources, fetcher: Arc<dyn FontFetcher>) -> Self {
        Self {
            sources,
            fetcher,
            cache: Mutex::new(None),
        }
    }

    pub fn sources(&self) -> &FontSources {
        &self.sources
    }

    /// The cached fonts, without triggering a load
    pub fn try_cached(&self) -> Option<Arc<LoadedFonts>> {
        self.cache.lock().clone()
    }

    /// Returns the cached fonts, fetching and registering them first if needed
    pub async fn ensure_fonts_loaded(&self) -> Result<Arc<LoadedFonts>> {
        if let Some(fonts) = self.try_cached() {
            return Ok(fonts);
        }

        let (regular, bold) = try_join(
            self.fetcher.fetch(&self.sources.regular),
            self.fetcher.fetch(&self.sources.bold),
        )
        .await?;

        let loaded = Arc::new(LoadedFonts::from_bytes(&self.sources, regular, bold)?);
        log::info!("Loaded font family '{}' (400, 700)", self.sources.family);

        let mut cache = self.cache.lock();
        Ok(Arc::clone(cache.get_or_insert(loaded)))
    }

    /// Startup preload: failures are logged and otherwise ignored
    pub async fn preload(&self) {
        if let Err(e) = self.ensure_fonts_loaded().await {
            log::warn!("Font preload failed: {}", e);
        }
    }

    /// Measurer backed by the cached faces, or the approximation if the
    /// fonts aren't loaded yet
    pub fn measurer(&self) -> Box<dyn labelhost_core::TextMeasurer> {
        match self.try_cached() {
            Some(fonts) => Box::new(FaceMeasurer::new(fonts)),
            None => {
                log::warn!("Fonts not loaded yet, measuring with approximate metrics");
                Box::new(ApproxMeasurer)
            },
        }
    }
}
