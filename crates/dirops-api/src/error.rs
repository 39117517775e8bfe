//! Error types for the directory operations API.
//!
//! Error responses carry a `{"detail": ...}` body with a 4xx/5xx status.
//! Per-line and per-account failures are NOT errors at this level; they are
//! collected into the regular response alongside successful results.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use dirops_audit::AuditError;
use dirops_gateway::GatewayError;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Error type for the directory operations API.
#[derive(Debug, thiserror::Error)]
pub enum ApiOpsError {
    /// Required input missing; rejected before any external call.
    #[error("{0}")]
    Validation(String),

    /// The directory gateway failed at the request level (e.g. the whole
    /// bulk command, not one account within it).
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// Audit store failure; the enclosing transaction was rolled back.
    #[error("{0}")]
    Store(#[from] AuditError),
}

impl IntoResponse for ApiOpsError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiOpsError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiOpsError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiOpsError::Store(AuditError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiOpsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = ApiOpsError::Validation("No user accounts provided".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn gateway_failure_maps_to_502() {
        let response = ApiOpsError::Gateway(GatewayError::Timeout { seconds: 60 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
