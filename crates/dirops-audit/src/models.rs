//! Audit row models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Kind of single-account action recorded in the actions log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    UnlockAccount,
    ResetPassword,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::UnlockAccount => write!(f, "UNLOCK_ACCOUNT"),
            ActionType::ResetPassword => write!(f, "RESET_PASSWORD"),
        }
    }
}

impl std::str::FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNLOCK_ACCOUNT" => Ok(ActionType::UnlockAccount),
            "RESET_PASSWORD" => Ok(ActionType::ResetPassword),
            other => Err(format!("Invalid action type: {other}")),
        }
    }
}

/// A persisted single-account action row. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountAction {
    pub id: i64,
    /// Stored action type string (see [`ActionType`]).
    pub action_type: String,
    pub sam_account_name: String,
    /// Ticket or reference identifier that authorized the action.
    pub reference: String,
    /// Operator account that performed the action.
    pub domain_user: String,
    /// Optional JSON metadata. Never contains a secret.
    pub additional_details: Option<String>,
    /// Server-assigned at insert, monotonic non-decreasing with insertion order.
    pub timestamp: DateTime<Utc>,
}

impl AccountAction {
    /// Parse `additional_details` as JSON, if present and well-formed.
    pub fn details_json(&self) -> Option<JsonValue> {
        self.additional_details
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// Input for one action row.
#[derive(Debug, Clone)]
pub struct NewAccountAction {
    pub action_type: ActionType,
    pub sam_account_name: String,
    pub reference: String,
    pub domain_user: String,
    pub additional_details: Option<JsonValue>,
}

/// A persisted bulk-disable row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DisabledAccount {
    pub idx: i64,
    /// Employee identifier carried through from the operator's input.
    pub eid: Option<String>,
    /// Program/department tag carried through from the operator's input.
    pub program: Option<String>,
    pub ticket_number: String,
    pub name: String,
    pub sam_account_name: String,
    pub user_principal_name: Option<String>,
    pub domain_username: String,
    pub timestamp: DateTime<Utc>,
}

/// Input for one bulk-disable row. Ticket and operator are supplied once
/// per batch by the store call.
#[derive(Debug, Clone)]
pub struct NewDisabledAccount {
    pub eid: Option<String>,
    pub program: Option<String>,
    pub name: String,
    pub sam_account_name: String,
    pub user_principal_name: Option<String>,
}
