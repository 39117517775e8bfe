//! Response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use dirops_audit::{AccountAction, DisabledAccount};
use dirops_core::UserResult;
use dirops_gateway::{ActionOutcome, DisableOutcome};

/// Response of `POST /api/search-users`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersResponse {
    /// True only when the errors list is empty.
    pub success: bool,
    /// Count of emitted results, sentinels included.
    pub total_users: usize,
    pub users: Vec<UserResult>,
    /// Collected non-fatal errors; omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Per-account outcome reported back to the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct DisableResult {
    pub account: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DisableOutcome> for DisableResult {
    fn from(outcome: DisableOutcome) -> Self {
        Self {
            account: outcome.account,
            success: outcome.success,
            error: outcome.error,
        }
    }
}

/// Response of `POST /api/bulk-disable-users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDisableResponse {
    /// True only when no account failed.
    pub success: bool,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<DisableResult>,
    pub ticket_number: String,
}

/// Response of unlock and password-reset endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
        }
    }
}

/// One audited action row on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionRecord {
    pub id: i64,
    pub action_type: String,
    pub sam_account_name: String,
    pub reference: String,
    pub domain_user: String,
    /// Parsed metadata; falls back to the raw text when not valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<serde_json::Value>,
    pub timestamp: String,
}

impl From<AccountAction> for ActionRecord {
    fn from(row: AccountAction) -> Self {
        let additional_details = match row.details_json() {
            Some(value) => Some(value),
            None => row.additional_details.clone().map(serde_json::Value::String),
        };
        Self {
            id: row.id,
            action_type: row.action_type,
            sam_account_name: row.sam_account_name,
            reference: row.reference,
            domain_user: row.domain_user,
            additional_details,
            timestamp: row.timestamp.to_rfc3339(),
        }
    }
}

/// Response of `GET /api/database-records`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordsResponse {
    pub success: bool,
    pub count: usize,
    pub records: Vec<ActionRecord>,
}

/// One bulk-disable audit row on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct DisabledRecord {
    pub idx: i64,
    pub eid: Option<String>,
    pub program: Option<String>,
    pub ticket_number: String,
    pub name: String,
    pub sam_account_name: String,
    pub user_principal_name: Option<String>,
    pub domain_username: String,
    pub timestamp: String,
}

impl From<DisabledAccount> for DisabledRecord {
    fn from(row: DisabledAccount) -> Self {
        Self {
            idx: row.idx,
            eid: row.eid,
            program: row.program,
            ticket_number: row.ticket_number,
            name: row.name,
            sam_account_name: row.sam_account_name,
            user_principal_name: row.user_principal_name,
            domain_username: row.domain_username,
            timestamp: row.timestamp.to_rfc3339(),
        }
    }
}

/// Response of `GET /api/disabled-accounts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DisabledRecordsResponse {
    pub success: bool,
    pub count: usize,
    pub records: Vec<DisabledRecord>,
}
