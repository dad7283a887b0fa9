//! Request and result types shared by the core components

use serde::{Deserialize, Serialize};

/// One chat request as seen by the core: an optional system instruction plus the user prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInput {
    /// System instruction, ignored when blank
    pub system: Option<String>,
    /// User prompt
    pub user_prompt: String,
}

impl ChatInput {
    pub fn new(system: Option<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system,
            user_prompt: user_prompt.into(),
        }
    }

    /// Shorthand for a request without a system instruction
    pub fn user(user_prompt: impl Into<String>) -> Self {
        Self::new(None, user_prompt)
    }

    /// System text, if present and not blank
    pub fn system_text(&self) -> Option<&str> {
        self.system.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// True when the user prompt has no non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.user_prompt.trim().is_empty()
    }
}

/// Final answer of a non-streaming completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub text: String,
}

impl CompletionResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Generation settings sent with every upstream request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "local-llama".to_string(),
            temperature: 0.2,
            max_tokens: 512,
        }
    }
}
