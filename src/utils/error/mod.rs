//! Error handling for the gateway
//!
//! This module defines all error types used throughout the gateway.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
