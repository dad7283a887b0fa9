//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::HttpClient(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::HttpClient(_)
            | GatewayError::Upstream(_)
            | GatewayError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            GatewayError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            GatewayError::HttpClient(e) if e.is_timeout() => ("UPSTREAM_TIMEOUT", self.to_string()),
            GatewayError::HttpClient(_) | GatewayError::Upstream(_) => {
                ("UPSTREAM_ERROR", self.to_string())
            }
            GatewayError::UpstreamStatus { .. } => ("UPSTREAM_STATUS", self.to_string()),
            GatewayError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            _ => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
