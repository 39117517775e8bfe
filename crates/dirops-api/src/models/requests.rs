//! Request bodies and query parameters.
//!
//! None of these types derive `Debug`: every POST body carries a domain
//! credential and must never end up in a log line by accident.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use dirops_core::UserResult;

/// Body of `POST /api/search-users`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersRequest {
    /// Domain controller address.
    pub server_address: String,
    /// Domain logon name used for the directory connection.
    pub username: String,
    /// Domain password. Never logged, never persisted.
    pub password: String,
    /// Raw multiline, comma-separated operator input.
    pub raw_input: String,
}

/// Body of `POST /api/bulk-disable-users`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDisableRequest {
    pub server_address: String,
    pub username: String,
    pub password: String,
    /// Account ids to disable.
    pub user_accounts: Vec<String>,
    /// Helpdesk ticket authorizing the batch.
    pub ticket_number: String,
    /// Detail records from a prior search, matched back by account id when
    /// writing audit rows.
    #[serde(default)]
    pub user_details: Vec<UserResult>,
}

/// Body of `POST /api/unlock-user`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnlockUserRequest {
    pub server_address: String,
    pub username: String,
    pub password: String,
    pub sam_account_name: String,
    /// Ticket or reference identifier for the audit row.
    pub reference: String,
}

/// Body of `POST /api/reset-password`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub server_address: String,
    pub username: String,
    pub password: String,
    pub sam_account_name: String,
    /// The new password. Never logged, never persisted in any field.
    pub new_password: String,
    /// When true the account must change the password at next logon.
    pub is_temporary: bool,
    pub reference: String,
}

/// Query parameters of `GET /api/database-records`.
#[derive(Deserialize, IntoParams)]
pub struct RecordsQuery {
    /// Maximum rows to return (default 100).
    pub limit: Option<i64>,
    /// Optional action type filter (UNLOCK_ACCOUNT / RESET_PASSWORD).
    pub action_type: Option<String>,
}

/// Query parameters of `GET /api/disabled-accounts`.
#[derive(Deserialize, IntoParams)]
pub struct DisabledQuery {
    /// Maximum rows to return (default 100).
    pub limit: Option<i64>,
    /// Optional ticket number filter.
    pub ticket: Option<String>,
}
