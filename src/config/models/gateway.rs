//! Main gateway configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream model backend
    #[serde(default)]
    pub model: ModelConfig,
    /// Client stream timing
    #[serde(default)]
    pub sse: SseConfig,
}

impl GatewayConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overwrite fields from environment-style variables. `lookup` returns the raw value
    /// for a variable name; unset or blank values leave the field alone.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("GATEWAY_PORT") {
            self.server.port = parse_var("GATEWAY_PORT", &port)?;
        }
        if let Some(base_url) = get("MODEL_BASE_URL") {
            self.model.base_url = base_url;
        }
        if let Some(endpoint) = get("MODEL_ENDPOINT") {
            self.model.endpoint = endpoint;
        }
        if let Some(name) = get("MODEL_NAME") {
            self.model.name = name;
        }
        if let Some(api_key) = get("MODEL_API_KEY") {
            self.model.api_key = Some(api_key);
        }
        if let Some(temperature) = get("MODEL_TEMPERATURE") {
            self.model.temperature = parse_var("MODEL_TEMPERATURE", &temperature)?;
        }
        if let Some(max_tokens) = get("MODEL_MAX_TOKENS") {
            self.model.max_tokens = parse_var("MODEL_MAX_TOKENS", &max_tokens)?;
        }
        if let Some(secs) = get("SSE_HEARTBEAT_SECS") {
            self.sse.heartbeat_secs = parse_var("SSE_HEARTBEAT_SECS", &secs)?;
        }
        if let Some(secs) = get("SSE_FIRST_TOKEN_TIMEOUT_SECS") {
            self.sse.first_token_timeout_secs = parse_var("SSE_FIRST_TOKEN_TIMEOUT_SECS", &secs)?;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid value for {}: {}", key, e)))
}
