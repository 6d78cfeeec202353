//! Process-scoped state, owned in one place

use std::sync::Arc;

use labelhost_core::{
    error::Result, AssetStore, DocumentStore, FilePicker, FontFetcher, HostConfig, Outbox,
};
use labelhost_fontdb::{FontLoader, HttpFontFetcher};
use labelhost_gesture::GestureRegistry;
use labelhost_raster::Rasterizer;
use labelhost_upload::{CommandPicker, HttpAssetStore, Uploader};
use parking_lot::Mutex;

/// The outside world as the handlers see it
pub struct Seams {
    pub fetcher: Arc<dyn FontFetcher>,
    pub picker: Arc<dyn FilePicker>,
    pub store: Arc<dyn AssetStore>,
}

impl Seams {
    /// reqwest for fonts and assets, the configured command for picking
    pub fn production(config: &HostConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Arc::new(HttpFontFetcher::new()),
            picker: Arc::new(CommandPicker::new(&config.picker_command)?),
            store: Arc::new(HttpAssetStore::new(config.asset_base_url.clone())),
        })
    }
}

/// Font cache, document store, gesture registry and the handlers built on
/// them
pub struct HostContext {
    pub config: HostConfig,
    pub fonts: Arc<FontLoader>,
    pub documents: Arc<Mutex<DocumentStore>>,
    pub gestures: Arc<Mutex<GestureRegistry>>,
    pub rasterizer: Arc<Rasterizer>,
    pub uploader: Arc<Uploader>,
    pub outbox: Outbox,
}

impl HostContext {
    pub fn new(config: HostConfig, seams: Seams, outbox: Outbox) -> Self {
        let fonts = Arc::new(FontLoader::new(config.fonts.clone(), seams.fetcher));
        let documents = Arc::new(Mutex::new(DocumentStore::new()));
        let rasterizer = Arc::new(Rasterizer::new(documents.clone(), fonts.clone()));
        let uploader = Arc::new(Uploader::new(seams.picker, seams.store));

        Self {
            config,
            fonts,
            documents,
            gestures: Arc::new(Mutex::new(GestureRegistry::new())),
            rasterizer,
            uploader,
            outbox,
        }
    }
}
