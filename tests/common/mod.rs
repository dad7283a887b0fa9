//! Common test utilities
//!
//! - `upstream`: wiremock stubs speaking each backend dialect
//! - `assertions`: parsing and checking client event streams

pub mod upstream;

pub use assertions::{SseEvent, parse_sse};
pub use upstream::{chat_delta, event_stream, gateway_config, model_config};
