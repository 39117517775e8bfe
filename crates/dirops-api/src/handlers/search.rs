//! Bulk user search endpoint.

use axum::{extract::State, Json};

use dirops_core::Credential;

use crate::error::ApiOpsError;
use crate::models::{SearchUsersRequest, SearchUsersResponse};
use crate::router::OpsState;

/// Search the directory for every line of the pasted operator input.
#[utoipa::path(
    post,
    path = "/api/search-users",
    tag = "directory",
    request_body = SearchUsersRequest,
    responses(
        (status = 200, description = "Results, sentinels included", body = SearchUsersResponse),
        (status = 400, description = "Empty input", body = crate::error::ErrorBody),
    )
)]
pub async fn search_users(
    State(state): State<OpsState>,
    Json(request): Json<SearchUsersRequest>,
) -> Result<Json<SearchUsersResponse>, ApiOpsError> {
    let credential = Credential::new(request.username, request.password);
    let response = state
        .search
        .search_users(&request.raw_input, &request.server_address, &credential)
        .await?;
    Ok(Json(response))
}
