//! Liveness endpoint shared by both services.
//!
//! `GET /health` only reports that the process is serving; the greeting
//! service does not probe its upstream here.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    /// A healthy report for `service`, stamped with this build's version.
    pub fn ok(service: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Routes for `/health`, labelled with the owning service.
pub fn routes(service: &'static str) -> Router {
    Router::new().route(
        "/health",
        get(move || async move { Json(HealthResponse::ok(service)) }),
    )
}
