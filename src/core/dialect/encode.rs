//! Request encoders, one per dialect

use super::{Dialect, DialectCodec};
use crate::core::types::{ChatInput, GenerationParams};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// Lower bound for the legacy generation length
pub const LEGACY_MIN_PREDICT: u32 = 8;
/// Upper bound for the legacy generation length
pub const LEGACY_MAX_PREDICT: u32 = 256;

#[derive(Debug, Serialize)]
struct RoleMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessagesBody<'a> {
    model: &'a str,
    messages: Vec<RoleMessage<'a>>,
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct PromptCompletionBody<'a> {
    model: &'a str,
    prompt: Cow<'a, str>,
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

/// The legacy protocol has no stream flag; it is left out of the body entirely.
#[derive(Debug, Serialize)]
struct LegacyCompletionBody<'a> {
    prompt: Cow<'a, str>,
    n_predict: u32,
    temperature: f64,
}

/// Flatten system and user text into one prompt for the completion dialects
pub fn compose_prompt(input: &ChatInput) -> Cow<'_, str> {
    match input.system_text() {
        Some(system) => Cow::Owned(format!(
            "[SYSTEM]\n{}\n\n[USER]\n{}\n\n[ASSISTANT]\n",
            system, input.user_prompt
        )),
        None => Cow::Borrowed(input.user_prompt.as_str()),
    }
}

/// Codec for chat-message backends
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatMessagesCodec;

impl DialectCodec for ChatMessagesCodec {
    fn dialect(&self) -> Dialect {
        Dialect::ChatMessages
    }

    fn encode_request(
        &self,
        input: &ChatInput,
        streaming: bool,
        params: &GenerationParams,
    ) -> Result<Value> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = input.system_text() {
            messages.push(RoleMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(RoleMessage {
            role: "user",
            content: &input.user_prompt,
        });

        Ok(serde_json::to_value(ChatMessagesBody {
            model: &params.model,
            messages,
            stream: streaming,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        })?)
    }
}

/// Codec for plain-prompt completion backends
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCompletionCodec;

impl DialectCodec for PromptCompletionCodec {
    fn dialect(&self) -> Dialect {
        Dialect::PromptCompletion
    }

    fn encode_request(
        &self,
        input: &ChatInput,
        streaming: bool,
        params: &GenerationParams,
    ) -> Result<Value> {
        Ok(serde_json::to_value(PromptCompletionBody {
            model: &params.model,
            prompt: compose_prompt(input),
            stream: streaming,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        })?)
    }
}

/// Codec for legacy single-endpoint completion backends
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCompletionCodec;

impl DialectCodec for LegacyCompletionCodec {
    fn dialect(&self) -> Dialect {
        Dialect::LegacyCompletion
    }

    fn encode_request(
        &self,
        input: &ChatInput,
        _streaming: bool,
        params: &GenerationParams,
    ) -> Result<Value> {
        Ok(serde_json::to_value(LegacyCompletionBody {
            prompt: compose_prompt(input),
            n_predict: params.max_tokens.clamp(LEGACY_MIN_PREDICT, LEGACY_MAX_PREDICT),
            temperature: params.temperature,
        })?)
    }
}
