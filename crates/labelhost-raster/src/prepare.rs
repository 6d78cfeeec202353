//! Turning a mounted document into a standalone image source
//!
//! The copy that gets rasterized must stand on its own: explicit pixel size,
//! the SVG namespace declared on the root, and (see `labelhost-fontdb`) the
//! fonts embedded. The result is wrapped as a base64 `data:` URL.

use base64::Engine;
use labelhost_core::{error::Result, HostError, RenderError};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

fn prepare_error(e: impl std::fmt::Display) -> HostError {
    RenderError::Prepare(e.to_string()).into()
}

/// Copy of the root tag with `width`/`height` filled in when missing and
/// `xmlns` forced to the SVG namespace
fn normalized_root(start: &BytesStart<'_>, width: u32, height: u32) -> Result<BytesStart<'static>> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut root = BytesStart::new(name);
    let mut has_width = false;
    let mut has_height = false;

    for attr in start.attributes() {
        let attr = attr.map_err(prepare_error)?;
        match attr.key.as_ref() {
            b"xmlns" => continue,
            b"width" => has_width = true,
            b"height" => has_height = true,
            _ => {},
        }
        root.push_attribute(attr);
    }

    if !has_width {
        root.push_attribute(("width", width.to_string().as_str()));
    }
    if !has_height {
        root.push_attribute(("height", height.to_string().as_str()));
    }
    root.push_attribute(("xmlns", SVG_NAMESPACE));
    Ok(root.into_owned())
}

/// Rewrites the root `<svg>` tag, leaving the rest of the markup untouched
pub fn normalize_root(svg: &str, width: u32, height: u32) -> Result<String> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len() + 96));
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(prepare_error)? {
            Event::Eof => break,
            Event::Start(start) if !seen_root => {
                let root = normalized_root(&start, width, height)?;
                writer.write_event(Event::Start(root)).map_err(prepare_error)?;
                seen_root = true;
            },
            Event::Empty(start) if !seen_root => {
                let root = normalized_root(&start, width, height)?;
                let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                writer.write_event(Event::Start(root)).map_err(prepare_error)?;
                writer.write_event(Event::End(end)).map_err(prepare_error)?;
                seen_root = true;
            },
            other => writer.write_event(other).map_err(prepare_error)?,
        }
    }

    if !seen_root {
        return Err(prepare_error("document has no root element"));
    }
    String::from_utf8(writer.into_inner()).map_err(prepare_error)
}

/// Wraps serialized markup as a `data:image/svg+xml;base64,` URL
pub fn svg_data_url(svg: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
    format!("{}{}", SVG_DATA_URL_PREFIX, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_size_is_filled_and_namespace_forced() {
        let out = normalize_root("<svg viewBox=\"0 0 10 5\"><rect/></svg>", 696, 271).unwrap();
        assert_eq!(
            out,
            "<svg viewBox=\"0 0 10 5\" width=\"696\" height=\"271\" xmlns=\"http://www.w3.org/2000/svg\"><rect/></svg>"
        );
    }

    #[test]
    fn test_existing_size_wins() {
        let out = normalize_root(
            "<svg width=\"100\" height=\"50\" xmlns=\"urn:wrong\"/>",
            696,
            271,
        )
        .unwrap();
        assert_eq!(
            out,
            "<svg width=\"100\" height=\"50\" xmlns=\"http://www.w3.org/2000/svg\"></svg>"
        );
    }

    #[test]
    fn test_only_root_is_touched() {
        let out = normalize_root("<svg><svg width=\"1\"/></svg>", 2, 3).unwrap();
        assert!(out.contains("<svg width=\"1\"/>"));
    }

    #[test]
    fn test_data_url_prefix() {
        assert_eq!(svg_data_url("<svg/>"), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
