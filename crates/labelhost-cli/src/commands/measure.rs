//! Measure command: one-shot text fitting

use std::sync::Arc;

use anyhow::{Context, Result};
use labelhost_core::{messages::MeasureRequest, FontWeight};
use labelhost_fit::fit_text;
use labelhost_fontdb::{ApproxMeasurer, FontLoader, HttpFontFetcher};

use crate::cli::MeasureArgs;

pub async fn run(args: &MeasureArgs) -> Result<()> {
    let req = MeasureRequest {
        request_id: 0.into(),
        text: args.text.replace("\\n", "\n"),
        font_family: args.fonts.font_family.clone(),
        font_weight: FontWeight(args.font_weight),
        max_font_size: args.max_font_size,
        min_font_size: args.min_font_size,
        max_width: args.max_width,
        max_height: args.max_height,
        line_height_multiplier: args.line_height,
        max_chars: args.max_chars,
    };

    let result = if args.approximate {
        fit_text(&req, &ApproxMeasurer)
    } else {
        let loader = FontLoader::new(args.fonts.sources(), Arc::new(HttpFontFetcher::new()));
        loader
            .ensure_fonts_loaded()
            .await
            .context("Failed to load fonts (use --approximate to skip)")?;
        fit_text(&req, loader.measurer().as_ref())
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );
    Ok(())
}
