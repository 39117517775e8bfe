//! Records exchanged with the directory shell.

use serde::{Deserialize, Serialize};

/// One user record as returned by the directory shell.
///
/// Transient: produced per call, merged into a response, never retained.
/// Optional fields may be absent for incompletely-provisioned accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryRecord {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "SamAccountName")]
    pub sam_account_name: Option<String>,
    #[serde(rename = "UserPrincipalName")]
    pub user_principal_name: Option<String>,
    #[serde(rename = "DistinguishedName")]
    pub distinguished_name: Option<String>,
    /// Account enabled flag; absent means disabled.
    #[serde(rename = "Enabled", default)]
    pub enabled: bool,
    /// Lockout flag; absent means not locked.
    #[serde(rename = "LockedOut", default)]
    pub locked_out: bool,
}

/// Per-account outcome of a bulk disable. One account's failure never
/// aborts the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisableOutcome {
    pub account: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a single mutating action (unlock, password reset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
