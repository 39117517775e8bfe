//! Account unlock endpoint.

use axum::{extract::State, Json};

use dirops_core::Credential;

use crate::error::ApiOpsError;
use crate::models::{ActionResponse, UnlockUserRequest};
use crate::router::OpsState;

/// Unlock one account. A failed unlock is a 200 with `success: false`;
/// only the directory call failing outright is an error status.
#[utoipa::path(
    post,
    path = "/api/unlock-user",
    tag = "directory",
    request_body = UnlockUserRequest,
    responses(
        (status = 200, description = "Unlock outcome", body = ActionResponse),
        (status = 400, description = "Missing account or reference", body = crate::error::ErrorBody),
    )
)]
pub async fn unlock_user(
    State(state): State<OpsState>,
    Json(request): Json<UnlockUserRequest>,
) -> Result<Json<ActionResponse>, ApiOpsError> {
    let credential = Credential::new(request.username, request.password);
    let response = state
        .accounts
        .unlock(
            &request.sam_account_name,
            &request.reference,
            &request.server_address,
            &credential,
        )
        .await?;
    Ok(Json(response))
}
