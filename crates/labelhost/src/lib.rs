//! labelhost: native capabilities for the label-printing UI core
//!
//! The UI core describes what it needs in messages; this crate answers them.
//! A [`Host`] owns the process-scoped state (font cache, mounted documents,
//! gesture trackers) and routes each inbound message to its handler:
//!
//! | Message | Handler | Answer |
//! |---|---|---|
//! | `measure-text` | [`labelhost_fit`] | `measure-result` |
//! | `svg-to-png` | [`labelhost_raster`] | `png-result` |
//! | `select-file` | [`labelhost_upload`] | `file-result` |
//! | `init-pinch-zoom`, `set-pinch-zoom`, `pointer` | [`labelhost_gesture`] | `zoom-update` at gesture end |
//! | `mount-svg`, `unmount` | document store | none |
//!
//! [`serve`] runs the whole thing over a line-delimited JSON stream.

pub mod context;
pub mod dispatch;
pub mod serve;

pub use context::{HostContext, Seams};
pub use dispatch::{decode_line, DecodedLine, Host};
pub use serve::{serve, write_message, ServeStats};

pub use labelhost_core as core;
pub use labelhost_core::{HostConfig, HostError, Inbound, Outbound, Result};
