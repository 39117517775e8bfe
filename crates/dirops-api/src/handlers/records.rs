//! Audit record read endpoints.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::ApiOpsError;
use crate::models::{
    ActionRecord, DisabledQuery, DisabledRecord, DisabledRecordsResponse, RecordsQuery,
    RecordsResponse,
};
use crate::router::OpsState;

const DEFAULT_LIMIT: i64 = 100;

/// Most recent audited unlock/reset actions.
#[utoipa::path(
    get,
    path = "/api/database-records",
    tag = "audit",
    params(RecordsQuery),
    responses(
        (status = 200, description = "Recent action rows", body = RecordsResponse),
    )
)]
pub async fn database_records(
    State(state): State<OpsState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<RecordsResponse>, ApiOpsError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let rows = state
        .audit
        .recent_actions(limit, query.action_type.as_deref())
        .await?;
    let records: Vec<ActionRecord> = rows.into_iter().map(ActionRecord::from).collect();
    Ok(Json(RecordsResponse {
        success: true,
        count: records.len(),
        records,
    }))
}

/// Most recent bulk-disable audit rows.
#[utoipa::path(
    get,
    path = "/api/disabled-accounts",
    tag = "audit",
    params(DisabledQuery),
    responses(
        (status = 200, description = "Recent bulk-disable rows", body = DisabledRecordsResponse),
    )
)]
pub async fn disabled_accounts(
    State(state): State<OpsState>,
    Query(query): Query<DisabledQuery>,
) -> Result<Json<DisabledRecordsResponse>, ApiOpsError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let rows = state
        .audit
        .recent_disabled(limit, query.ticket.as_deref())
        .await?;
    let records: Vec<DisabledRecord> = rows.into_iter().map(DisabledRecord::from).collect();
    Ok(Json(DisabledRecordsResponse {
        success: true,
        count: records.len(),
        records,
    }))
}
