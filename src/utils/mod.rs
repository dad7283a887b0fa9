//! Utility modules for the gateway
//!
//! - **error**: Error types and HTTP error responses
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};

/// Truncate a string to at most `max_chars` characters, appending an ellipsis when cut
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_pos, _)) => format!("{}...", &s[..byte_pos]),
    }
}
