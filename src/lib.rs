//! # sse-chat-gateway
//!
//! A small gateway in front of one text-generation backend. Whatever the backend speaks
//! (OpenAI-style chat messages, prompt completions, or a legacy single-prompt endpoint)
//! clients get the same two interfaces: a whole answer as JSON, or a Server-Sent Events
//! stream with heartbeats, a first-token timeout with non-streaming fallback, and a
//! terminal `done` event that always arrives.
//!
//! ## Embedding the core
//!
//! ```rust,no_run
//! use sse_chat_gateway::{ChatInput, CompletionAggregator, Config, UpstreamClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/gateway.yaml").await?;
//!     let upstream = UpstreamClient::new(config.model())?;
//!     let aggregator = CompletionAggregator::new(Arc::new(upstream));
//!
//!     let answer = aggregator.complete(&ChatInput::user("Hello!")).await?;
//!     println!("{}", answer.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway mode
//!
//! ```rust,no_run
//! use sse_chat_gateway::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/gateway.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::completion::CompletionAggregator;
pub use core::dialect::Dialect;
pub use core::streaming::{OutboundComposer, OutboundFragment, StreamSettings};
pub use core::types::{ChatInput, CompletionResult, GenerationParams};
pub use core::upstream::{FragmentSource, FragmentStream, UpstreamClient};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
