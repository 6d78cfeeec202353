//! Routing inbound messages to their handlers
//!
//! Synchronous work (measuring, mounting, gestures) runs inline and has
//! answered by the time [`Host::dispatch`] returns. Rasterizing, file
//! selection and gesture initialisation are spawned onto the runtime; each
//! carries a [`Responder`](labelhost_core::Responder) where a response is
//! owed, so it answers exactly once however it ends.

use std::sync::Arc;

use futures::channel::mpsc::UnboundedReceiver;
use labelhost_core::{
    error::Result,
    messages::{
        MeasureRequest, PointerEvent, RasterRequest, RasterResult, RequestHeader,
        SelectFileRequest, UploadResult,
    },
    HostConfig, Inbound, Outbound, Outbox,
};
use labelhost_fit::fit_text;

use crate::context::{HostContext, Seams};

/// What one inbound line turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    Message(Inbound),
    /// Unreadable, but its request id is known, so it still gets an answer
    Rejected(Outbound),
    Skipped,
}

/// Decodes one message line
///
/// A line that fails to decode is answered with an error when its `type`
/// and `requestId` can still be read; otherwise it is logged and skipped.
pub fn decode_line(line: &str) -> DecodedLine {
    let line = line.trim();
    if line.is_empty() {
        return DecodedLine::Skipped;
    }
    let err = match serde_json::from_str(line) {
        Ok(msg) => return DecodedLine::Message(msg),
        Err(e) => e,
    };
    let rejected = serde_json::from_str::<RequestHeader>(line)
        .ok()
        .and_then(|header| header.failure(format!("malformed request: {}", err)));
    match rejected {
        Some(response) => {
            log::warn!("Rejecting malformed request: {}", err);
            DecodedLine::Rejected(response)
        },
        None => {
            log::warn!("Skipping malformed message: {}", err);
            DecodedLine::Skipped
        },
    }
}

/// The dispatcher: one per process
pub struct Host {
    ctx: Arc<HostContext>,
}

impl Host {
    /// A host with production seams and the receiving end of its outbox
    pub fn new(config: HostConfig) -> Result<(Self, UnboundedReceiver<Outbound>)> {
        config.validate()?;
        let seams = Seams::production(&config)?;
        Ok(Self::with_seams(config, seams))
    }

    pub fn with_seams(config: HostConfig, seams: Seams) -> (Self, UnboundedReceiver<Outbound>) {
        let (outbox, rx) = Outbox::channel();
        let ctx = HostContext::new(config, seams, outbox);
        (Self { ctx: Arc::new(ctx) }, rx)
    }

    pub fn context(&self) -> &HostContext {
        &self.ctx
    }

    pub fn outbox(&self) -> &Outbox {
        &self.ctx.outbox
    }

    /// Starts background work; must run inside a tokio runtime
    pub fn start(&self) {
        if self.ctx.config.preload_fonts {
            let fonts = self.ctx.fonts.clone();
            tokio::spawn(async move { fonts.preload().await });
        }
    }

    /// Decodes and dispatches one message line
    pub fn dispatch_line(&self, line: &str) {
        match decode_line(line) {
            DecodedLine::Message(msg) => self.dispatch(msg),
            DecodedLine::Rejected(response) => self.ctx.outbox.send(response),
            DecodedLine::Skipped => {},
        }
    }

    /// Routes one message; must run inside a tokio runtime
    pub fn dispatch(&self, msg: Inbound) {
        log::debug!("Dispatching {}", msg.kind());
        match msg {
            Inbound::MeasureText(req) => self.measure(&req),
            Inbound::SvgToPng(req) => self.spawn_rasterize(req),
            Inbound::SelectFile(req) => self.spawn_select_file(req),
            Inbound::InitPinchZoom {
                element_id,
                initial_zoom,
            } => self.spawn_init_pinch_zoom(element_id, initial_zoom),
            Inbound::SetPinchZoom {
                element_id,
                zoom,
                pan_x,
                pan_y,
            } => {
                let mut documents = self.ctx.documents.lock();
                self.ctx
                    .gestures
                    .lock()
                    .set(&mut documents, &element_id, zoom, pan_x, pan_y);
            },
            Inbound::MountSvg { element_id, svg } => {
                log::debug!("Mounting '{}' ({} bytes)", element_id, svg.len());
                self.ctx.documents.lock().mount(element_id, svg);
            },
            Inbound::Unmount { element_id } => {
                self.ctx.documents.lock().unmount(&element_id);
                self.ctx.gestures.lock().remove(&element_id);
            },
            Inbound::Pointer { element_id, event } => self.pointer(&element_id, &event),
        }
    }

    fn measure(&self, req: &MeasureRequest) {
        let measurer = self.ctx.fonts.measurer();
        let result = fit_text(req, measurer.as_ref());
        self.ctx.outbox.send(Outbound::MeasureResult(result));
    }

    fn pointer(&self, element_id: &str, event: &PointerEvent) {
        let outcome = {
            let mut documents = self.ctx.documents.lock();
            self.ctx
                .gestures
                .lock()
                .handle(&mut documents, element_id, event)
        };
        match outcome.and_then(|o| o.update) {
            Some(update) => self.ctx.outbox.send(Outbound::ZoomUpdate(update)),
            None => log::trace!("Pointer event for '{}' produced no update", element_id),
        }
    }

    fn spawn_rasterize(&self, req: RasterRequest) {
        let responder = self.ctx.outbox.responder::<RasterResult>(req.request_id.clone());
        let rasterizer = self.ctx.rasterizer.clone();
        tokio::spawn(async move {
            let result = rasterizer.rasterize(&req).await;
            responder.respond(result);
        });
    }

    fn spawn_select_file(&self, req: SelectFileRequest) {
        let responder = self.ctx.outbox.responder::<UploadResult>(req.request_id.clone());
        let uploader = self.ctx.uploader.clone();
        tokio::spawn(async move {
            let result = uploader.select_and_upload(&req).await;
            responder.respond(result);
        });
    }

    fn spawn_init_pinch_zoom(&self, element_id: String, initial_zoom: f32) {
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            let mut documents = ctx.documents.lock();
            ctx.gestures
                .lock()
                .init(&mut documents, &element_id, initial_zoom);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_idless_lines_are_skipped() {
        assert_eq!(decode_line("   "), DecodedLine::Skipped);
        assert_eq!(decode_line("{not json"), DecodedLine::Skipped);
        assert_eq!(
            decode_line(r#"{"type":"svg-to-png","width":1.5}"#),
            DecodedLine::Skipped
        );
        assert_eq!(
            decode_line(r#"{"type":"pointer","requestId":3,"elementId":1}"#),
            DecodedLine::Skipped
        );
    }

    #[test]
    fn test_bad_field_with_request_id_is_rejected() {
        let decoded = decode_line(
            r#"{"type":"svg-to-png","requestId":5,"sourceElementId":"x","width":696.5,"height":271}"#,
        );
        let DecodedLine::Rejected(Outbound::PngResult(result)) = decoded else {
            panic!("expected a png-result rejection, got {:?}", decoded);
        };
        assert_eq!(result.request_id, labelhost_core::RequestId::Number(5));
        assert_eq!(result.data_url, None);
        assert!(result.error.unwrap().starts_with("malformed request: "));
    }

    #[test]
    fn test_valid_line_decodes() {
        let decoded = decode_line(r#"{"type":"unmount","elementId":"preview"}"#);
        assert_eq!(
            decoded,
            DecodedLine::Message(Inbound::Unmount {
                element_id: "preview".into()
            })
        );
    }
}
