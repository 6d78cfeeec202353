//! Text measurers
//!
//! [`FaceMeasurer`] reads advances from the registered faces. Until those are
//! loaded, [`ApproxMeasurer`] stands in with fixed per-character widths, the
//! same way a browser measures with its default font while web fonts load.

use std::sync::Arc;

use labelhost_core::{FontSpec, TextMeasurer};

use crate::LoadedFonts;

/// Measures with the faces the rasterizer will draw with
#[derive(Debug, Clone)]
pub struct FaceMeasurer {
    fonts: Arc<LoadedFonts>,
}

impl FaceMeasurer {
    pub fn new(fonts: Arc<LoadedFonts>) -> Self {
        Self { fonts }
    }
}

impl TextMeasurer for FaceMeasurer {
    fn name(&self) -> &'static str {
        "skrifa"
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        if !font.family.eq_ignore_ascii_case(self.fonts.family()) {
            log::debug!(
                "Measuring '{}' with registered family '{}'",
                font.family,
                self.fonts.family()
            );
        }
        match self.fonts.registry().face_for(font.weight) {
            Some(face) => face.text_width(text, font.size),
            None => ApproxMeasurer.text_width(text, font),
        }
    }
}

/// Em-based estimate used when no face is registered
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasurer;

impl ApproxMeasurer {
    const SPACE_EM: f32 = 0.25;
    const REGULAR_EM: f32 = 0.5;
    const BOLD_EM: f32 = 0.55;
}

impl TextMeasurer for ApproxMeasurer {
    fn name(&self) -> &'static str {
        "approx"
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let glyph_em = if font.weight.is_bold() {
            Self::BOLD_EM
        } else {
            Self::REGULAR_EM
        };
        text.chars()
            .map(|ch| if ch == ' ' { Self::SPACE_EM } else { glyph_em })
            .sum::<f32>()
            * font.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelhost_core::FontWeight;

    #[test]
    fn test_approx_widths() {
        let m = ApproxMeasurer;
        let regular = FontSpec::new("Any", FontWeight::REGULAR, 20.0);
        assert_eq!(m.text_width("ab", &regular), 20.0);
        assert_eq!(m.text_width("a b", &regular), 25.0);
        assert_eq!(m.text_width("", &regular), 0.0);

        let bold = regular.with_size(10.0);
        let bold = FontSpec {
            weight: FontWeight::BOLD,
            ..bold
        };
        assert!((m.text_width("abcd", &bold) - 22.0).abs() < 1e-4);
    }
}
