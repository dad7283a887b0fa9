//! Validators for the gateway configuration sections

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.model.validate()?;
        self.sse.validate()?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for ModelConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Model base URL is invalid: {}", e))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "Model base URL must use http:// or https://, got: {}",
                    scheme
                ));
            }
        }

        if !self.endpoint.starts_with('/') {
            return Err(format!(
                "Model endpoint must start with '/', got: {}",
                self.endpoint
            ));
        }

        if self.name.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0 and 2, got: {}",
                self.temperature
            ));
        }

        if self.max_tokens == 0 {
            return Err("Max tokens must be greater than 0".to_string());
        }

        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Upstream timeouts must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for SseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.heartbeat_secs == 0 {
            return Err("Heartbeat interval must be greater than 0".to_string());
        }

        if self.first_token_timeout_secs == 0 {
            return Err("First token timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
