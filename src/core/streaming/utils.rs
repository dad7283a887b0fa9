//! Utility functions for outbound streams

use super::types::OutboundFragment;
use std::fmt::Display;

/// Error text sent when a request carries no usable prompt
pub const MISSING_PROMPT_ERROR: &str = "missing userPrompt";

/// Text of every heartbeat comment
pub const HEARTBEAT_COMMENT: &str = "ping";

/// Inline error notice delivered as a regular message
pub fn error_message(error: impl Display) -> OutboundFragment {
    OutboundFragment::Message(format!("[error] {}", error))
}

/// Heartbeat comment fragment
pub fn heartbeat() -> OutboundFragment {
    OutboundFragment::Comment(HEARTBEAT_COMMENT.to_string())
}
