//! Stub upstream helpers

use serde_json::json;
use sse_chat_gateway::Config;
use sse_chat_gateway::config::ModelConfig;
use wiremock::MockServer;

/// Model config pointing at `server` with the given endpoint path
pub fn model_config(server: &MockServer, endpoint: &str) -> ModelConfig {
    ModelConfig {
        base_url: server.uri(),
        endpoint: endpoint.to_string(),
        api_key: Some("sk-test".to_string()),
        connect_timeout_secs: 2,
        request_timeout_secs: 30,
        ..ModelConfig::default()
    }
}

/// Gateway config pointing at `server`, with a one-second first-token timeout
pub fn gateway_config(server: &MockServer, endpoint: &str) -> Config {
    let mut config = Config::default();
    config.gateway.model = model_config(server, endpoint);
    config.gateway.sse.first_token_timeout_secs = 1;
    config
}

/// One chat-dialect streaming payload
pub fn chat_delta(content: &str) -> String {
    json!({"choices": [{"delta": {"content": content}}]}).to_string()
}

/// Event-stream body with one `data:` line per payload, then the end sentinel
pub fn event_stream(payloads: &[String]) -> String {
    let mut body = String::new();
    for payload in payloads {
        body.push_str("data: ");
        body.push_str(payload);
        body.push_str("\n\n");
    }
    body.push_str("data: [DONE]\n\n");
    body
}
