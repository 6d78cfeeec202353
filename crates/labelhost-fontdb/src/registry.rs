//! Registered faces: one family, one face per weight
//!
//! Both the measurer and the rasterizer read font bytes from here, so a
//! width measured for wrapping is the width that ends up in the PNG.

use std::sync::Arc;

use labelhost_core::{error::Result, FontLoadError, FontWeight};
use skrifa::{
    instance::{LocationRef, Size},
    GlyphId, MetadataProvider,
};

/// Container formats we can tell apart by their magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    TrueType,
    OpenType,
    Woff,
    Woff2,
}

impl FontFormat {
    pub fn sniff(data: &[u8]) -> Self {
        match data.get(..4) {
            Some(b"OTTO") => Self::OpenType,
            Some(b"wOFF") => Self::Woff,
            Some(b"wOF2") => Self::Woff2,
            _ => Self::TrueType,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::TrueType => "font/ttf",
            Self::OpenType => "font/otf",
            Self::Woff => "font/woff",
            Self::Woff2 => "font/woff2",
        }
    }

    /// Value for the `format()` hint of an `@font-face` source
    pub fn css_format(self) -> &'static str {
        match self {
            Self::TrueType => "truetype",
            Self::OpenType => "opentype",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }
}

/// A validated face and the weight it answers to
#[derive(Debug, Clone)]
pub struct RegisteredFace {
    family: String,
    weight: FontWeight,
    data: Arc<Vec<u8>>,
}

impl RegisteredFace {
    /// Parses `data` once to make sure later lookups can't fail on it
    pub fn new(family: &str, weight: FontWeight, data: Vec<u8>, origin: &str) -> Result<Self> {
        skrifa::FontRef::new(&data).map_err(|_| FontLoadError::InvalidData(origin.to_string()))?;

        Ok(Self {
            family: family.to_string(),
            weight,
            data: Arc::new(data),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sum of glyph advances for `text` at `size` pixels per em
    ///
    /// Unmapped characters advance by the width of `.notdef`, the glyph the
    /// rasterizer would draw for them.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let Ok(font) = skrifa::FontRef::new(&self.data) else {
            return 0.0;
        };
        let charmap = font.charmap();
        let metrics = font.glyph_metrics(Size::new(size), LocationRef::default());

        text.chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or(GlyphId::new(0));
                metrics.advance_width(gid).unwrap_or(0.0)
            })
            .sum()
    }
}

/// Faces registered for text measurement and rasterization
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    faces: Vec<RegisteredFace>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a face, replacing any face already registered at that weight
    pub fn add(&mut self, face: RegisteredFace) {
        log::debug!("Registered '{}' at weight {}", face.family, face.weight.0);
        self.faces.retain(|f| f.weight != face.weight);
        self.faces.push(face);
    }

    pub fn faces(&self) -> &[RegisteredFace] {
        &self.faces
    }

    /// The face CSS font matching picks for `weight`
    ///
    /// This is the rule the rasterizer's font database applies, so measured
    /// and drawn text use the same face.
    pub fn face_for(&self, weight: FontWeight) -> Option<&RegisteredFace> {
        let chosen = match_weight(self.faces.iter().map(|f| f.weight.0), weight.0)?;
        self.faces.iter().find(|f| f.weight.0 == chosen)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// CSS Fonts level 3 weight matching over the `available` weights
///
/// 400 to 500 look up to 500 first, then lighter, then heavier. Below 400
/// looks lighter first; above 500 looks heavier first.
fn match_weight(available: impl Iterator<Item = u16> + Clone, want: u16) -> Option<u16> {
    let lighter = || available.clone().filter(|&w| w < want).max();
    let heavier = || available.clone().filter(|&w| w > want).min();

    if available.clone().any(|w| w == want) {
        return Some(want);
    }
    if (400..=500).contains(&want) {
        let up_to_500 = available.clone().filter(|&w| w > want && w <= 500).min();
        up_to_500.or_else(lighter).or_else(heavier)
    } else if want < 400 {
        lighter().or_else(heavier)
    } else {
        heavier().or_else(lighter)
    }
}
