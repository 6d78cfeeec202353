//! labelhost core: the shared vocabulary of the integration layer
//!
//! The UI core of the label printer cannot measure text, rasterize SVG,
//! track gestures or upload files on its own. It sends messages; the host
//! answers them. This crate holds everything the handlers agree on:
//!
//! - [`messages`] - The wire protocol, inbound and outbound
//! - [`outbox`] - The outbound channel and the one-response-per-request guard
//! - [`document`] - Mounted vector documents and their view state
//! - [`traits`] - Seams to fonts, file pickers and the asset store
//! - [`config`] - Host configuration and its defaults
//! - [`error`] - Error taxonomy shared by every handler

pub mod config;
pub mod document;
pub mod error;
pub mod messages;
pub mod outbox;
pub mod traits;

pub use config::{FontSources, HostConfig};
pub use document::{Cursor, DocumentStore, MountedElement};
pub use error::{FontLoadError, HostError, RenderError, Result, UploadError};
pub use messages::{FontWeight, Inbound, Outbound, RequestId};
pub use outbox::{Outbox, Reply, Responder};
pub use traits::{AssetStore, FilePicker, FontFetcher, FontSpec, PickedFile, TextMeasurer};
