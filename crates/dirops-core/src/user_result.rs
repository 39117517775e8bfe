//! Merged per-user result model.
//!
//! One `UserResult` is emitted per directory match per search line; lines
//! with zero matches or a failed directory call emit exactly one sentinel
//! result instead, so every line is visible in the output.
//!
//! Field names on the wire are PascalCase for compatibility with the
//! existing operator tooling that consumes this format.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::input::SearchLine;

/// Sentinel display name for a line with zero directory matches.
pub const NOT_FOUND_NAME: &str = "USER NOT FOUND";

/// Sentinel display name for a line whose directory call failed.
pub const SEARCH_FAILED_NAME: &str = "SEARCH FAILED";

/// How a result row came to be.
///
/// The sentinel `Name` text is preserved for display compatibility, but
/// callers should branch on this enum rather than parsing the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// A real directory record matched the search term.
    Found,
    /// The search succeeded but matched nothing.
    NotFound,
    /// The directory call itself failed for this line.
    SearchFailed,
}

/// A directory record merged with the custom tags of its originating
/// search line. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SamAccountName")]
    pub sam_account_name: String,
    #[serde(rename = "UserPrincipalName")]
    pub user_principal_name: String,
    #[serde(rename = "DistinguishedName")]
    pub distinguished_name: String,
    #[serde(rename = "IsDisabled")]
    pub is_disabled: bool,
    #[serde(rename = "IsLocked")]
    pub is_locked: bool,
    /// First tag of the originating line (e.g. employee id).
    #[serde(rename = "CustomField1")]
    pub custom_field1: Option<String>,
    #[serde(rename = "CustomField2")]
    pub custom_field2: Option<String>,
    #[serde(rename = "CustomField3")]
    pub custom_field3: Option<String>,
    /// Always the search term the line was matched with.
    #[serde(rename = "CustomField4")]
    pub custom_field4: Option<String>,
    #[serde(default = "default_status")]
    pub status: ResultStatus,
}

fn default_status() -> ResultStatus {
    ResultStatus::Found
}

impl UserResult {
    /// Sentinel row for a line with zero matches.
    ///
    /// Disabled/locked default to `true`/`false` so the row sorts with the
    /// accounts that need attention, matching long-standing tool behavior.
    pub fn not_found(line: &SearchLine) -> Self {
        Self::sentinel(NOT_FOUND_NAME, ResultStatus::NotFound, line)
    }

    /// Sentinel row for a line whose directory call failed.
    pub fn search_failed(line: &SearchLine) -> Self {
        Self::sentinel(SEARCH_FAILED_NAME, ResultStatus::SearchFailed, line)
    }

    fn sentinel(name: &str, status: ResultStatus, line: &SearchLine) -> Self {
        Self {
            name: name.to_string(),
            sam_account_name: line.term.clone(),
            user_principal_name: "N/A".to_string(),
            distinguished_name: "N/A".to_string(),
            is_disabled: true,
            is_locked: false,
            custom_field1: line.tag1.clone(),
            custom_field2: line.tag2.clone(),
            custom_field3: line.tag3.clone(),
            custom_field4: Some(line.term.clone()),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> SearchLine {
        SearchLine {
            tag1: Some("EID123".to_string()),
            term: "nosuchuser".to_string(),
            tag2: None,
            tag3: None,
        }
    }

    #[test]
    fn not_found_sentinel_shape() {
        let result = UserResult::not_found(&line());
        assert_eq!(result.name, "USER NOT FOUND");
        assert_eq!(result.sam_account_name, "nosuchuser");
        assert!(result.is_disabled);
        assert!(!result.is_locked);
        assert_eq!(result.status, ResultStatus::NotFound);
        assert_eq!(result.custom_field4.as_deref(), Some("nosuchuser"));
    }

    #[test]
    fn search_failed_sentinel_is_distinguishable() {
        let result = UserResult::search_failed(&line());
        assert_eq!(result.name, "SEARCH FAILED");
        assert_eq!(result.status, ResultStatus::SearchFailed);
    }

    #[test]
    fn serializes_with_pascal_case_field_names() {
        let result = UserResult::not_found(&line());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["Name"], "USER NOT FOUND");
        assert_eq!(json["SamAccountName"], "nosuchuser");
        assert_eq!(json["IsDisabled"], true);
        assert_eq!(json["CustomField1"], "EID123");
        assert_eq!(json["status"], "not_found");
    }
}
