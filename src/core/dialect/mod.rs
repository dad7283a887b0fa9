//! Backend dialects
//!
//! A backend is reached through exactly one of a fixed set of request/response shapes.
//! The dialect is derived once from the configured endpoint path and every request for
//! that backend is encoded and decoded through the matching [`DialectCodec`].

mod decode;
mod encode;

use crate::core::types::{ChatInput, GenerationParams};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub use decode::{full_response_text, fragment_text};
pub use encode::{
    ChatMessagesCodec, LEGACY_MAX_PREDICT, LEGACY_MIN_PREDICT, LegacyCompletionCodec,
    PromptCompletionCodec, compose_prompt,
};

/// Request/response shape spoken by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Role-tagged message list (`/chat/completions`)
    ChatMessages,
    /// Single prompt string (`/completions`)
    PromptCompletion,
    /// Single-endpoint legacy completion (`/completion`)
    LegacyCompletion,
}

impl Dialect {
    /// Classify an endpoint path. First match wins:
    /// chat segment, then plain completions segment, then the legacy single-word segment.
    /// Anything else is treated as a prompt completion backend.
    pub fn classify(endpoint_path: &str) -> Self {
        let path = endpoint_path.trim().trim_end_matches('/').to_ascii_lowercase();

        if path.contains("/chat/completions") {
            Dialect::ChatMessages
        } else if path.contains("/completions") {
            Dialect::PromptCompletion
        } else if path.rsplit('/').next() == Some("completion") {
            Dialect::LegacyCompletion
        } else {
            Dialect::PromptCompletion
        }
    }

    /// Codec implementing this dialect
    pub fn codec(self) -> &'static dyn DialectCodec {
        match self {
            Dialect::ChatMessages => &ChatMessagesCodec,
            Dialect::PromptCompletion => &PromptCompletionCodec,
            Dialect::LegacyCompletion => &LegacyCompletionCodec,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::ChatMessages => "chat_messages",
            Dialect::PromptCompletion => "prompt_completion",
            Dialect::LegacyCompletion => "legacy_completion",
        }
    }

    pub fn encode_request(
        self,
        input: &ChatInput,
        streaming: bool,
        params: &GenerationParams,
    ) -> Result<Value> {
        self.codec().encode_request(input, streaming, params)
    }

    pub fn decode_fragment(self, payload: &str) -> String {
        self.codec().decode_fragment(payload)
    }

    pub fn decode_full_response(self, body: &str) -> String {
        self.codec().decode_full_response(body)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoder/decoder pair for one dialect.
///
/// Decoding is shape-tolerant and shared by all dialects: backends are known to leak
/// shapes from neighbouring dialects (a chat backend ignoring the stream flag, a legacy
/// backend answering with top-level `content`), so every decoder accepts all of them.
pub trait DialectCodec: Send + Sync {
    /// Dialect this codec implements
    fn dialect(&self) -> Dialect;

    /// Build the JSON request body
    fn encode_request(
        &self,
        input: &ChatInput,
        streaming: bool,
        params: &GenerationParams,
    ) -> Result<Value>;

    /// Text carried by one streamed payload, empty when none is recognised
    fn decode_fragment(&self, payload: &str) -> String {
        fragment_text(payload)
    }

    /// Text carried by a one-shot response body, empty when none is recognised
    fn decode_full_response(&self, body: &str) -> String {
        full_response_text(body)
    }
}
