//! Outbound event stream configuration

use super::*;
use crate::core::streaming::StreamSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Heartbeat and first-token timing for client streams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SseConfig {
    /// Seconds between heartbeat comments
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    /// Seconds to wait for the first upstream fragment before falling back
    #[serde(default = "default_first_token_timeout_secs")]
    pub first_token_timeout_secs: u64,
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            heartbeat_secs: default_heartbeat_secs(),
            first_token_timeout_secs: default_first_token_timeout_secs(),
        }
    }
}

impl SseConfig {
    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings::new(
            Duration::from_secs(self.heartbeat_secs),
            Duration::from_secs(self.first_token_timeout_secs),
        )
    }
}
