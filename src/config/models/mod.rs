//! Configuration data models
//!
//! This module defines all configuration structures used by the gateway.

#![allow(missing_docs)]

pub mod gateway;
pub mod model;
pub mod server;
pub mod sse;

// Re-export all configuration types
pub use gateway::*;
pub use model::*;
pub use server::*;
pub use sse::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

pub fn default_base_url() -> String {
    "http://localhost:8000/v1".to_string()
}

pub fn default_endpoint() -> String {
    "/chat/completions".to_string()
}

pub fn default_model_name() -> String {
    "local-llama".to_string()
}

pub fn default_temperature() -> f64 {
    0.2
}

pub fn default_max_tokens() -> u32 {
    512
}

/// Default upstream connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

/// Default upstream request timeout in seconds; long enough for slow generations
pub fn default_request_timeout() -> u64 {
    600
}

pub fn default_heartbeat_secs() -> u64 {
    20
}

pub fn default_first_token_timeout_secs() -> u64 {
    7
}
