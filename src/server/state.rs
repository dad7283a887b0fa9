//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::completion::CompletionAggregator;
use crate::core::streaming::{OutboundComposer, StreamSettings};
use crate::core::upstream::{FragmentSource, UpstreamClient};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// HTTP server state shared across handlers
///
/// Everything here is read-only after startup; each request gets its own composer.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Whole-answer completions
    pub aggregator: Arc<CompletionAggregator>,
    /// Heartbeat and first-token timing for client streams
    pub stream_settings: StreamSettings,
}

impl AppState {
    /// State backed by the configured HTTP upstream
    pub fn new(config: Config) -> Result<Self> {
        let client = UpstreamClient::new(config.model())?;
        info!(
            url = client.url(),
            dialect = %client.dialect(),
            "Upstream backend configured"
        );
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// State backed by an arbitrary fragment source
    pub fn with_source(config: Config, source: Arc<dyn FragmentSource>) -> Self {
        let stream_settings = config.sse().stream_settings();
        Self {
            aggregator: Arc::new(CompletionAggregator::new(source)),
            config: Arc::new(config),
            stream_settings,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh composer for one client stream
    pub fn composer(&self) -> OutboundComposer {
        OutboundComposer::new(self.aggregator.clone(), self.stream_settings)
    }
}
