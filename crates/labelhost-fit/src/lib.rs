//! Text fitting: the largest font size at which label text fits its box
//!
//! Fitting runs in two passes. The width pass shrinks the size until the
//! widest paragraph fits on one line. The text is then word-wrapped at that
//! size, and if a height limit is set, the height pass keeps shrinking (and
//! re-wrapping) until the wrapped block fits vertically. The minimum size is
//! a hard floor: text that still overflows there is returned as is.
//!
//! ```
//! use labelhost_core::{messages::MeasureRequest, FontSpec, TextMeasurer};
//! use labelhost_fit::fit_text;
//!
//! struct Mono;
//! impl TextMeasurer for Mono {
//!     fn name(&self) -> &'static str { "mono" }
//!     fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
//!         text.chars().count() as f32 * font.size * 0.5
//!     }
//! }
//!
//! let req = MeasureRequest {
//!     request_id: 1.into(),
//!     text: "Pumpkin soup".into(),
//!     font_family: "Atkinson Hyperlegible".into(),
//!     font_weight: Default::default(),
//!     max_font_size: 40,
//!     min_font_size: 10,
//!     max_width: 120.0,
//!     max_height: 0.0,
//!     line_height_multiplier: 1.2,
//!     max_chars: None,
//! };
//! let result = fit_text(&req, &Mono);
//! assert_eq!(result.fitted_font_size, 20);
//! assert_eq!(result.lines, vec!["Pumpkin soup"]);
//! ```

use labelhost_core::{
    messages::{MeasureRequest, MeasureResult},
    FontSpec, TextMeasurer,
};

#[cfg(test)]
mod proptests;

const ELLIPSIS: &str = "...";

/// Cuts `text` to `max_chars` characters, the last three being `...`
pub fn truncate_chars(text: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(max) if text.chars().count() > max => {
            let keep = max.saturating_sub(ELLIPSIS.len());
            let mut out: String = text.chars().take(keep).collect();
            out.push_str(ELLIPSIS);
            out
        },
        _ => text.to_string(),
    }
}

/// Splits on explicit line breaks; each piece is wrapped on its own
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|p| p.strip_suffix('\r').unwrap_or(p))
        .collect()
}

/// Greedy word wrap of a single paragraph
///
/// A word wider than `max_width` gets a line to itself; words are never
/// split. A paragraph without words becomes one empty line.
pub fn wrap_paragraph(
    paragraph: &str,
    font: &FontSpec,
    max_width: f32,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measurer.text_width(&candidate, font) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps every paragraph and concatenates the lines in order
pub fn wrap_text(
    paragraphs: &[&str],
    font: &FontSpec,
    max_width: f32,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    paragraphs
        .iter()
        .flat_map(|p| wrap_paragraph(p, font, max_width, measurer))
        .collect()
}

fn widest_paragraph(paragraphs: &[&str], font: &FontSpec, measurer: &dyn TextMeasurer) -> f32 {
    paragraphs
        .iter()
        .map(|p| measurer.text_width(p, font))
        .fold(0.0, f32::max)
}

fn block_height(size: u32, line_height: f32, line_count: usize) -> f32 {
    size as f32 * line_height * line_count as f32
}

/// Finds the fitted size and the wrapped lines for `req`
pub fn fit_text(req: &MeasureRequest, measurer: &dyn TextMeasurer) -> MeasureResult {
    let text = truncate_chars(&req.text, req.max_chars);
    let paragraphs = split_paragraphs(&text);
    let max_size = req.max_font_size;
    let min_size = req.min_font_size.min(max_size);
    let font_at = |size: u32| FontSpec::new(req.font_family.as_str(), req.font_weight, size as f32);

    let mut size = max_size;
    while size > min_size && widest_paragraph(&paragraphs, &font_at(size), measurer) > req.max_width
    {
        size -= 1;
    }

    let mut lines = wrap_text(&paragraphs, &font_at(size), req.max_width, measurer);

    if req.max_height > 0.0 {
        while size > min_size
            && block_height(size, req.line_height_multiplier, lines.len()) > req.max_height
        {
            size -= 1;
            lines = wrap_text(&paragraphs, &font_at(size), req.max_width, measurer);
        }
    }

    log::debug!(
        "Fitted request {} at {}px ({} lines, measurer {})",
        req.request_id,
        size,
        lines.len(),
        measurer.name()
    );

    MeasureResult::fitted(req.request_id.clone(), size, lines)
}
