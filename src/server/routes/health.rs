//! Health check endpoint

use crate::core::dialect::Dialect;
use crate::server::state::AppState;
use crate::{BuildInfo, build_info};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub build: BuildInfo,
    pub upstream: UpstreamInfo,
}

/// What the gateway talks to; no credentials
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamInfo {
    pub endpoint: String,
    pub model: String,
    pub dialect: Dialect,
}

/// Liveness plus version and upstream summary. Does not contact the upstream.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let model = state.config.model();
    HttpResponse::Ok().json(HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        build: build_info(),
        upstream: UpstreamInfo {
            endpoint: model.endpoint.clone(),
            model: model.name.clone(),
            dialect: model.dialect(),
        },
    })
}
