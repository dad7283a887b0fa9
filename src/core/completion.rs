//! Whole-answer completion on top of a fragment source

use crate::core::types::{ChatInput, CompletionResult};
use crate::core::upstream::{FragmentSource, FragmentStream};
use crate::utils::error::Result;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Collapses a fragment sequence into one answer, retrying once without streaming when
/// the streamed answer comes back blank.
#[derive(Clone)]
pub struct CompletionAggregator {
    source: Arc<dyn FragmentSource>,
}

impl CompletionAggregator {
    pub fn new(source: Arc<dyn FragmentSource>) -> Self {
        Self { source }
    }

    /// Open a streaming fragment sequence for `input`
    pub fn stream(&self, input: &ChatInput) -> FragmentStream {
        self.source.stream(input, true)
    }

    /// Streamed answer, or the non-streaming answer when the stream yielded nothing usable.
    ///
    /// A blank result after the retry is a successful empty answer. Transport errors from
    /// the retry propagate; a transport error on the streaming attempt that produced no
    /// text falls through to the retry.
    pub async fn complete(&self, input: &ChatInput) -> Result<CompletionResult> {
        match collect_fragments(self.stream(input)).await {
            Ok(text) if !text.trim().is_empty() => return Ok(CompletionResult { text }),
            Ok(_) => warn!("streamed completion was blank, retrying without streaming"),
            Err(e) => warn!(error = %e, "streamed completion failed, retrying without streaming"),
        }
        self.complete_once(input).await
    }

    /// Single non-streaming call, no retry
    pub async fn complete_once(&self, input: &ChatInput) -> Result<CompletionResult> {
        let text = collect_fragments(self.source.stream(input, false)).await?;
        debug!(chars = text.chars().count(), "non-streaming completion finished");
        Ok(CompletionResult { text })
    }
}

/// Concatenate fragments in arrival order, stopping at the first error
pub async fn collect_fragments(mut stream: FragmentStream) -> Result<String> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        text.push_str(&fragment?);
    }
    Ok(text)
}
