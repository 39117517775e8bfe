//! Connection profile listing.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use dirops_core::CredentialProfile;

use crate::router::OpsState;

/// Response of `GET /api/credentials`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CredentialsResponse {
    pub success: bool,
    pub credentials: Vec<CredentialProfile>,
}

/// Connection profiles loaded at startup. Empty when no profile file was
/// configured.
#[utoipa::path(
    get,
    path = "/api/credentials",
    tag = "directory",
    responses(
        (status = 200, description = "Configured connection profiles", body = CredentialsResponse),
    )
)]
pub async fn list_credentials(State(state): State<OpsState>) -> Json<CredentialsResponse> {
    Json(CredentialsResponse {
        success: true,
        credentials: state.credentials.as_ref().clone(),
    })
}
