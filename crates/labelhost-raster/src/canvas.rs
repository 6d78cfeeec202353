//! Decoding and drawing: from image source to PNG
//!
//! The decoded image is stretched onto a white canvas of the target size.
//! For rotated output the image is first drawn landscape (height × width)
//! and that canvas is then copied onto the final width × height canvas with
//! a quarter turn clockwise, which is the orientation the label printer
//! feeds in.

use std::sync::Arc;

use base64::Engine;
use image::ImageEncoder;
use labelhost_core::{error::Result, RenderError};
use labelhost_fontdb::LoadedFonts;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::prepare::SVG_DATA_URL_PREFIX;

/// Canvases larger than this on either side are refused
pub const MAX_DIMENSION: u32 = 16_384;

/// A white canvas, the page every raster starts from
pub fn blank_canvas(width: u32, height: u32) -> Result<Pixmap> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(RenderError::InvalidDimensions { width, height }.into());
    }
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
    pixmap.fill(Color::WHITE);
    Ok(pixmap)
}

/// Font database holding exactly the registered faces
///
/// The generic families point at the loaded face, so text whose family
/// does not match the face's internal name still draws with it.
pub fn font_database(fonts: &LoadedFonts) -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    for face in fonts.registry().faces() {
        db.load_font_data(face.data().to_vec());
    }

    let internal_name = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    if let Some(name) = internal_name {
        db.set_serif_family(name.as_str());
        db.set_sans_serif_family(name.as_str());
    }
    db
}

/// Parse options that resolve text against the registered faces only
pub fn decode_options(fonts: Option<&LoadedFonts>) -> usvg::Options<'static> {
    let mut options = usvg::Options::default();
    if let Some(fonts) = fonts {
        options.font_family = fonts.family().to_string();
        options.fontdb = Arc::new(font_database(fonts));
    }
    options
}

/// Loads a `data:image/svg+xml;base64,` source as an image
pub fn decode_svg_source(source: &str, options: &usvg::Options<'_>) -> Result<usvg::Tree> {
    let encoded = source
        .strip_prefix(SVG_DATA_URL_PREFIX)
        .ok_or(RenderError::Decode)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| RenderError::Decode)?;
    usvg::Tree::from_data(&bytes, options).map_err(|e| {
        log::debug!("SVG decode failed: {}", e);
        RenderError::Decode.into()
    })
}

/// Draws `tree` stretched to fill a white `width` × `height` canvas
pub fn draw_stretched(tree: &usvg::Tree, width: u32, height: u32) -> Result<Pixmap> {
    let mut canvas = blank_canvas(width, height)?;
    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(tree, transform, &mut canvas.as_mut());
    Ok(canvas)
}

/// Copies `landscape` onto a white `width` × `height` canvas turned a
/// quarter clockwise: translate to the right edge, then rotate by 90°
///
/// `landscape` must be `height` wide and `width` tall.
pub fn rotate_clockwise(landscape: &Pixmap, width: u32, height: u32) -> Result<Pixmap> {
    if landscape.width() != height || landscape.height() != width {
        return Err(RenderError::InvalidDimensions {
            width: landscape.width(),
            height: landscape.height(),
        }
        .into());
    }
    let mut canvas = blank_canvas(width, height)?;
    let paint = PixmapPaint {
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    };
    // (x, y) -> (width - y, x)
    let transform = Transform::from_row(0.0, 1.0, -1.0, 0.0, width as f32, 0.0);
    canvas.draw_pixmap(0, 0, landscape.as_ref(), &paint, transform, None);
    Ok(canvas)
}

/// Renders `tree` for a `width` × `height` output, optionally rotated
pub fn render(tree: &usvg::Tree, width: u32, height: u32, rotate: bool) -> Result<Pixmap> {
    if rotate {
        let landscape = draw_stretched(tree, height, width)?;
        rotate_clockwise(&landscape, width, height)
    } else {
        draw_stretched(tree, width, height)
    }
}

/// PNG bytes of `pixmap` with straight (non-premultiplied) alpha
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut png = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(&rgba, pixmap.width(), pixmap.height(), image::ExtendedColorType::Rgba8)
        .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;
    Ok(png)
}

/// `data:image/png;base64,` URL of `pixmap`
pub fn png_data_url(pixmap: &Pixmap) -> Result<String> {
    let png = encode_png(pixmap)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}
