//! Font embedding for standalone SVG documents
//!
//! A serialized SVG loses access to fonts the page loaded through CSS. The
//! faces travel inside the document instead: a `<style>` block with one
//! `@font-face` rule per weight, sources as `data:` URLs.

use labelhost_core::{error::Result, HostError, RenderError};
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::FontAssetPair;

fn prepare_error(e: impl std::fmt::Display) -> HostError {
    RenderError::Prepare(e.to_string()).into()
}

/// `@font-face` rules for both weights of `family`
pub fn font_face_css(family: &str, fonts: &FontAssetPair) -> String {
    let family = family.replace('\'', "\\'");
    let mut css = String::new();
    for (weight, asset) in [(400, &fonts.regular), (700, &fonts.bold)] {
        css.push_str(&format!(
            "\n@font-face {{\n  font-family: '{}';\n  font-weight: {};\n  src: url('{}') format('{}');\n}}",
            family,
            weight,
            asset.data_url,
            asset.format.css_format()
        ));
    }
    css.push('\n');
    css
}

fn write_style<W: std::io::Write>(writer: &mut Writer<W>, css: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("style")))
        .map_err(prepare_error)?;
    writer
        .write_event(Event::CData(BytesCData::new(css)))
        .map_err(prepare_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("style")))
        .map_err(prepare_error)?;
    Ok(())
}

fn is_svg_root(start: &BytesStart<'_>) -> bool {
    start.local_name().as_ref() == b"svg"
}

/// Returns `svg` with the font faces inserted as the root's first child
pub fn embed_fonts_in_svg(svg: &str, family: &str, fonts: &FontAssetPair) -> Result<String> {
    let css = font_face_css(family, fonts);
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len() + css.len() + 32));
    let mut depth = 0usize;
    let mut inserted = false;

    loop {
        match reader.read_event().map_err(prepare_error)? {
            Event::Eof => break,
            Event::Start(start) if depth == 0 && !inserted => {
                if !is_svg_root(&start) {
                    return Err(prepare_error("root element is not <svg>"));
                }
                writer.write_event(Event::Start(start)).map_err(prepare_error)?;
                write_style(&mut writer, &css)?;
                inserted = true;
                depth += 1;
            },
            Event::Empty(start) if depth == 0 && !inserted => {
                if !is_svg_root(&start) {
                    return Err(prepare_error("root element is not <svg>"));
                }
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                writer.write_event(Event::Start(start)).map_err(prepare_error)?;
                write_style(&mut writer, &css)?;
                writer
                    .write_event(Event::End(BytesEnd::new(name)))
                    .map_err(prepare_error)?;
                inserted = true;
            },
            Event::Start(start) => {
                depth += 1;
                writer.write_event(Event::Start(start)).map_err(prepare_error)?;
            },
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(end)).map_err(prepare_error)?;
            },
            other => writer.write_event(other).map_err(prepare_error)?,
        }
    }

    if !inserted {
        return Err(prepare_error("document has no <svg> root"));
    }

    String::from_utf8(writer.into_inner()).map_err(prepare_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontAsset, FontFormat};

    fn fake_pair() -> FontAssetPair {
        FontAssetPair {
            regular: FontAsset {
                data_url: "data:font/ttf;base64,UkVH".into(),
                format: FontFormat::TrueType,
            },
            bold: FontAsset {
                data_url: "data:font/ttf;base64,Qk9MRA==".into(),
                format: FontFormat::TrueType,
            },
        }
    }

    #[test]
    fn test_style_becomes_first_child() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#;
        let out = embed_fonts_in_svg(svg, "Atkinson Hyperlegible", &fake_pair()).unwrap();

        let style_at = out.find("<style>").unwrap();
        let rect_at = out.find("<rect").unwrap();
        assert!(style_at < rect_at);
        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><style>"#));
        assert!(out.ends_with("</svg>"));
    }

    #[test]
    fn test_css_has_both_weights() {
        let css = font_face_css("Atkinson Hyperlegible", &fake_pair());
        assert!(css.contains("font-family: 'Atkinson Hyperlegible';"));
        assert!(css.contains("font-weight: 400;\n  src: url('data:font/ttf;base64,UkVH') format('truetype');"));
        assert!(css.contains("font-weight: 700;\n  src: url('data:font/ttf;base64,Qk9MRA==') format('truetype');"));
    }

    #[test]
    fn test_self_closing_root_is_expanded() {
        let out = embed_fonts_in_svg("<svg/>", "F", &fake_pair()).unwrap();
        assert!(out.starts_with("<svg><style><![CDATA["));
        assert!(out.ends_with("]]></style></svg>"));
    }

    #[test]
    fn test_prolog_is_preserved() {
        let svg = "<?xml version=\"1.0\"?>\n<svg><g><text>Hi</text></g></svg>";
        let out = embed_fonts_in_svg(svg, "F", &fake_pair()).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\"?>\n<svg><style>"));
        assert!(out.contains("<g><text>Hi</text></g></svg>"));
        assert_eq!(out.matches("<style>").count(), 1);
    }

    #[test]
    fn test_non_svg_root_is_rejected() {
        assert!(embed_fonts_in_svg("<html/>", "F", &fake_pair()).is_err());
        assert!(embed_fonts_in_svg("", "F", &fake_pair()).is_err());
    }
}
