//! Bulk account disable endpoint.

use axum::{extract::State, Json};

use dirops_core::Credential;

use crate::error::ApiOpsError;
use crate::models::{BulkDisableRequest, BulkDisableResponse};
use crate::router::OpsState;

/// Disable a batch of accounts under one ticket number.
#[utoipa::path(
    post,
    path = "/api/bulk-disable-users",
    tag = "directory",
    request_body = BulkDisableRequest,
    responses(
        (status = 200, description = "Per-account outcomes", body = BulkDisableResponse),
        (status = 400, description = "Missing accounts or ticket", body = crate::error::ErrorBody),
        (status = 502, description = "Directory shell failed", body = crate::error::ErrorBody),
    )
)]
pub async fn bulk_disable_users(
    State(state): State<OpsState>,
    Json(request): Json<BulkDisableRequest>,
) -> Result<Json<BulkDisableResponse>, ApiOpsError> {
    let credential = Credential::new(request.username, request.password);
    let response = state
        .accounts
        .bulk_disable(
            &request.user_accounts,
            &request.ticket_number,
            &request.user_details,
            &request.server_address,
            &credential,
        )
        .await?;
    Ok(Json(response))
}
