//! Core functionality for the gateway
//!
//! Request types, backend dialects, the upstream fragment source, whole-answer
//! aggregation and the client-facing stream composer.

pub mod completion;
pub mod dialect;
pub mod streaming;
pub mod types;
pub mod upstream;

pub use completion::CompletionAggregator;
pub use dialect::Dialect;
pub use streaming::{OutboundComposer, OutboundFragment, StreamSettings};
pub use types::{ChatInput, CompletionResult, GenerationParams};
pub use upstream::{FragmentSource, FragmentStream, UpstreamClient};
