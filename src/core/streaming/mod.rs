//! Client-facing event streams
//!
//! [`OutboundComposer`] turns one chat request into a sequence of [`OutboundFragment`]s:
//! upstream text, heartbeat comments while the connection is idle, fallbacks when the
//! upstream stalls or comes back empty, and always exactly one terminal `done` event.

use crate::utils::error::GatewayError;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpResponse, web};
use futures::stream::Stream;

mod composer;
mod types;
pub mod utils;


pub use composer::{OutboundComposer, StreamSettings};
pub use types::{ComposerState, Event, OutboundFragment};
pub use utils::{HEARTBEAT_COMMENT, MISSING_PROMPT_ERROR, error_message, heartbeat};

/// Create a Server-Sent Events response for Actix-web
pub fn create_sse_response<S>(stream: S) -> HttpResponse
where
    S: Stream<Item = Result<web::Bytes, GatewayError>> + 'static,
{
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(stream)
}
