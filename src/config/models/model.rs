//! Upstream model backend configuration

use super::*;
use crate::core::dialect::Dialect;
use crate::core::types::GenerationParams;
use serde::{Deserialize, Serialize};

/// Where the backend lives and how to ask it for completions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL, e.g. `http://localhost:8000/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Endpoint path appended to the base URL; also selects the request dialect
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier sent with chat and prompt requests
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Bearer token, if the backend wants one
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            name: default_model_name(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ModelConfig {
    /// Full request URL
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    /// Request dialect implied by the endpoint path
    pub fn dialect(&self) -> Dialect {
        Dialect::classify(&self.endpoint)
    }

    /// API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.name.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
