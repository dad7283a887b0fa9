//! Server builder and run_server function

use crate::config::Config;
use crate::core::upstream::FragmentSource;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    source: Option<Arc<dyn FragmentSource>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the HTTP upstream with another fragment source
    pub fn with_source(mut self, source: Arc<dyn FragmentSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        match self.source {
            Some(source) => Ok(HttpServer::with_state(AppState::with_source(config, source))),
            None => HttpServer::new(&config),
        }
    }
}

/// Run the server until it is shut down
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting SSE chat gateway v{}", crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build()?;
    let state = server.state();
    info!(
        "Server starting at: http://{}",
        state.config.server().address()
    );
    info!(
        heartbeat_secs = state.config.sse().heartbeat_secs,
        first_token_timeout_secs = state.config.sse().first_token_timeout_secs,
        "Client stream timing"
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/chat - Whole-answer chat");
    info!("   GET  /api/chat/stream - Streaming chat (query parameters)");
    info!("   POST /api/chat/stream - Streaming chat (JSON body)");

    server.start().await
}
