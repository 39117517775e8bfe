//! Password reset endpoint.

use axum::{extract::State, Json};

use dirops_core::Credential;

use crate::error::ApiOpsError;
use crate::models::{ActionResponse, ResetPasswordRequest};
use crate::router::OpsState;

/// Reset one account's password. The new password travels to the
/// directory shell and nowhere else; the audit row records only the
/// password type.
#[utoipa::path(
    post,
    path = "/api/reset-password",
    tag = "directory",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Reset outcome", body = ActionResponse),
        (status = 400, description = "Missing account, password or reference", body = crate::error::ErrorBody),
    )
)]
pub async fn reset_password(
    State(state): State<OpsState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ActionResponse>, ApiOpsError> {
    let credential = Credential::new(request.username, request.password);
    let response = state
        .accounts
        .reset_password(
            &request.sam_account_name,
            &request.new_password,
            request.is_temporary,
            &request.reference,
            &request.server_address,
            &credential,
        )
        .await?;
    Ok(Json(response))
}
