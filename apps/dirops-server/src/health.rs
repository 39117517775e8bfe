//! Service health endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use dirops_audit::AuditStore;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// "connected" or "unavailable"; the endpoint itself stays 200 so
    /// operators can see WHAT is degraded.
    pub database: String,
}

/// Liveness plus a best-effort audit database probe.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    )
)]
pub async fn health_handler(State(audit): State<AuditStore>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(audit.pool()).await {
        Ok(_) => "connected",
        Err(_) => "unavailable",
    };
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "dirops".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
