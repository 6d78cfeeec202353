//! Outbound side of the message channel
//!
//! [`Responder`] is the only way an asynchronous handler can answer a
//! request. If it is dropped unanswered (an early return, a panic unwinding
//! the task) it answers with an error itself, so every request gets exactly
//! one response.

use crate::messages::{Outbound, RasterResult, RequestId, UploadResult};
use futures::channel::mpsc;
use std::marker::PhantomData;

/// Error text used when a handler goes away without answering
pub const ABANDONED: &str = "request abandoned before completion";

/// Cloneable sender for outbound messages
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl Outbox {
    /// A fresh outbox and the receiving end the transport drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx }, rx)
    }

    pub fn send(&self, message: Outbound) {
        if let Err(e) = self.tx.unbounded_send(message) {
            log::warn!("Outbound channel closed, dropping {:?}", e.into_inner());
        }
    }

    /// Response slot for one request
    pub fn responder<R: Reply>(&self, request_id: RequestId) -> Responder<R> {
        Responder {
            request_id,
            outbox: self.clone(),
            answered: false,
            _reply: PhantomData,
        }
    }
}

/// A response type that can stand in for a handler that never answered
pub trait Reply: Send + 'static {
    fn abandoned(request_id: RequestId) -> Self;

    fn into_outbound(self) -> Outbound;
}

impl Reply for RasterResult {
    fn abandoned(request_id: RequestId) -> Self {
        RasterResult::failure(request_id, ABANDONED)
    }

    fn into_outbound(self) -> Outbound {
        Outbound::PngResult(self)
    }
}

impl Reply for UploadResult {
    fn abandoned(request_id: RequestId) -> Self {
        UploadResult::failure(request_id, ABANDONED)
    }

    fn into_outbound(self) -> Outbound {
        Outbound::FileResult(self)
    }
}

/// Answers one request exactly once
#[must_use = "dropping a Responder answers the request with an error"]
pub struct Responder<R: Reply> {
    request_id: RequestId,
    outbox: Outbox,
    answered: bool,
    _reply: PhantomData<fn() -> R>,
}

impl<R: Reply> Responder<R> {
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Sends the response, consuming the slot
    pub fn respond(mut self, reply: R) {
        self.answered = true;
        self.outbox.send(reply.into_outbound());
    }
}

impl<R: Reply> Drop for Responder<R> {
    fn drop(&mut self) {
        if !self.answered {
            log::warn!("Request {} dropped without a response", self.request_id);
            self.outbox
                .send(R::abandoned(self.request_id.clone()).into_outbound());
        }
    }
}
