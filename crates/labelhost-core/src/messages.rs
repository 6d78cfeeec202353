//! The message channel: what the UI core sends and what it gets back
//!
//! One JSON object per message, tagged by `"type"`, fields in camelCase.
//! Every request that carries a `requestId` is answered by exactly one
//! response carrying the same id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque correlation token, echoed verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// CSS-style numeric font weight
///
/// Accepts `400`, `"700"`, `"normal"` and `"bold"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeightRepr", into = "u16")]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    /// Whether font matching picks the bold face over the regular one
    pub fn is_bold(self) -> bool {
        self.0 > 500
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl From<FontWeight> for u16 {
    fn from(w: FontWeight) -> Self {
        w.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Number(u16),
    Text(String),
}

impl TryFrom<WeightRepr> for FontWeight {
    type Error = String;

    fn try_from(repr: WeightRepr) -> Result<Self, Self::Error> {
        match repr {
            WeightRepr::Number(n) => Ok(FontWeight(n)),
            WeightRepr::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "normal" | "regular" => Ok(FontWeight::REGULAR),
                "bold" => Ok(FontWeight::BOLD),
                other => other
                    .parse::<u16>()
                    .map(FontWeight)
                    .map_err(|_| format!("unknown font weight: {}", s)),
            },
        }
    }
}

fn default_line_height() -> f32 {
    1.2
}

/// Fit text into a box: find a font size and wrap lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureRequest {
    pub request_id: RequestId,
    pub text: String,
    pub font_family: String,
    #[serde(default)]
    pub font_weight: FontWeight,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub max_width: f32,
    /// Zero disables the vertical constraint
    #[serde(default)]
    pub max_height: f32,
    #[serde(default = "default_line_height")]
    pub line_height_multiplier: f32,
    /// Truncate longer text with an ellipsis before fitting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureResult {
    pub request_id: RequestId,
    pub fitted_font_size: u32,
    pub lines: Vec<String>,
    /// Set only when the request could not be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MeasureResult {
    pub fn fitted(request_id: RequestId, fitted_font_size: u32, lines: Vec<String>) -> Self {
        Self {
            request_id,
            fitted_font_size,
            lines,
            error: None,
        }
    }

    pub fn failure(request_id: RequestId, error: impl Into<String>) -> Self {
        Self {
            request_id,
            fitted_font_size: 0,
            lines: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Rasterize a mounted vector document to PNG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterRequest {
    #[serde(alias = "svgId")]
    pub source_element_id: String,
    pub request_id: RequestId,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub rotate: bool,
}

/// Exactly one of `data_url` and `error` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterResult {
    pub request_id: RequestId,
    pub data_url: Option<String>,
    pub error: Option<String>,
}

impl RasterResult {
    pub fn success(request_id: RequestId, data_url: String) -> Self {
        Self {
            request_id,
            data_url: Some(data_url),
            error: None,
        }
    }

    pub fn failure(request_id: RequestId, error: impl Into<String>) -> Self {
        Self {
            request_id,
            data_url: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectFileRequest {
    pub request_id: RequestId,
    pub max_size_kb: u64,
    #[serde(default)]
    pub accept_types: Vec<String>,
}

/// `data_url` holds the storage path of the uploaded asset.
/// Both fields are `None` when the user cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub request_id: RequestId,
    pub data_url: Option<String>,
    pub error: Option<String>,
}

impl UploadResult {
    pub fn uploaded(request_id: RequestId, path: String) -> Self {
        Self {
            request_id,
            data_url: Some(path),
            error: None,
        }
    }

    pub fn failure(request_id: RequestId, error: impl Into<String>) -> Self {
        Self {
            request_id,
            data_url: None,
            error: Some(error.into()),
        }
    }

    pub fn cancelled(request_id: RequestId) -> Self {
        Self {
            request_id,
            data_url: None,
            error: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.data_url.is_none() && self.error.is_none()
    }
}

/// Screen position in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Raw pointer input for a zoomable element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PointerEvent {
    #[serde(rename_all = "camelCase")]
    MouseDown { button: u8, x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    #[serde(rename_all = "camelCase")]
    Wheel { delta_y: f32 },
}

/// Emitted when a gesture ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomUpdate {
    pub element_id: String,
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

/// Everything the UI core can send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inbound {
    MeasureText(MeasureRequest),
    SvgToPng(RasterRequest),
    SelectFile(SelectFileRequest),
    #[serde(rename_all = "camelCase")]
    InitPinchZoom { element_id: String, initial_zoom: f32 },
    #[serde(rename_all = "camelCase")]
    SetPinchZoom {
        element_id: String,
        zoom: f32,
        pan_x: f32,
        pan_y: f32,
    },
    #[serde(rename_all = "camelCase")]
    MountSvg { element_id: String, svg: String },
    #[serde(rename_all = "camelCase")]
    Unmount { element_id: String },
    #[serde(rename_all = "camelCase")]
    Pointer {
        element_id: String,
        event: PointerEvent,
    },
}

impl Inbound {
    /// Wire name of this message kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MeasureText(_) => "measure-text",
            Self::SvgToPng(_) => "svg-to-png",
            Self::SelectFile(_) => "select-file",
            Self::InitPinchZoom { .. } => "init-pinch-zoom",
            Self::SetPinchZoom { .. } => "set-pinch-zoom",
            Self::MountSvg { .. } => "mount-svg",
            Self::Unmount { .. } => "unmount",
            Self::Pointer { .. } => "pointer",
        }
    }
}

/// The kind and correlation id of a request, readable even when the rest
/// of the message is not
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    #[serde(rename = "type")]
    pub kind: String,
    pub request_id: RequestId,
}

impl RequestHeader {
    /// The error response this request kind expects, or `None` for kinds
    /// that are never answered
    pub fn failure(self, error: impl Into<String>) -> Option<Outbound> {
        let RequestHeader { kind, request_id } = self;
        match kind.as_str() {
            "measure-text" => Some(Outbound::MeasureResult(MeasureResult::failure(
                request_id, error,
            ))),
            "svg-to-png" => Some(Outbound::PngResult(RasterResult::failure(request_id, error))),
            "select-file" => Some(Outbound::FileResult(UploadResult::failure(request_id, error))),
            _ => None,
        }
    }
}

/// Everything the host sends back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outbound {
    MeasureResult(MeasureResult),
    PngResult(RasterResult),
    FileResult(UploadResult),
    ZoomUpdate(ZoomUpdate),
}

impl Outbound {
    /// Correlation id, for the responses that carry one
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            Self::MeasureResult(r) => Some(&r.request_id),
            Self::PngResult(r) => Some(&r.request_id),
            Self::FileResult(r) => Some(&r.request_id),
            Self::ZoomUpdate(_) => None,
        }
    }
}
