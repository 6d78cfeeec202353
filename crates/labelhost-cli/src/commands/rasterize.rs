//! Rasterize command: one SVG file to one PNG

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use base64::Engine;
use labelhost_core::{messages::RasterRequest, DocumentStore};
use labelhost_fontdb::{FontLoader, HttpFontFetcher};
use labelhost_raster::Rasterizer;
use parking_lot::Mutex;

use crate::cli::RasterizeArgs;

const ELEMENT_ID: &str = "cli-input";

pub async fn run(args: &RasterizeArgs) -> Result<()> {
    let svg = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let documents = Arc::new(Mutex::new(DocumentStore::new()));
    documents.lock().mount(ELEMENT_ID, svg);
    let fonts = Arc::new(FontLoader::new(
        args.fonts.sources(),
        Arc::new(HttpFontFetcher::new()),
    ));
    let rasterizer = Rasterizer::new(documents, fonts);

    let result = rasterizer
        .rasterize(&RasterRequest {
            source_element_id: ELEMENT_ID.into(),
            request_id: 0.into(),
            width: args.width,
            height: args.height,
            rotate: args.rotate,
        })
        .await;

    let data_url = match (result.data_url, result.error) {
        (Some(url), _) => url,
        (None, Some(error)) => bail!("Rasterization failed: {}", error),
        (None, None) => bail!("Rasterization produced no output"),
    };

    match &args.output {
        Some(path) => {
            let encoded = data_url
                .strip_prefix("data:image/png;base64,")
                .ok_or_else(|| anyhow!("Unexpected data URL"))?;
            let png = base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .context("Failed to decode PNG data")?;
            tokio::fs::write(path, &png)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} ({} bytes)", path.display(), png.len());
        },
        None => println!("{}", data_url),
    }
    Ok(())
}
