//! Bulk user search orchestration.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use dirops_core::{parse_search_input, Credential, SearchLine, UserResult};
use dirops_gateway::{DirectoryGateway, DirectoryRecord};

use crate::error::ApiOpsError;
use crate::models::SearchUsersResponse;

/// Runs the line-by-line bulk search against the directory gateway and
/// merges records back with each line's custom tags.
pub struct SearchService {
    gateway: Arc<dyn DirectoryGateway>,
}

impl SearchService {
    pub fn new(gateway: Arc<dyn DirectoryGateway>) -> Self {
        Self { gateway }
    }

    /// Parse the raw operator input and search each line sequentially.
    ///
    /// One line's failure never aborts the batch: a failed directory call
    /// emits a single SEARCH FAILED sentinel and the batch continues; zero
    /// matches emit a single USER NOT FOUND sentinel. `success` is true
    /// only when the errors list ends up empty.
    #[instrument(skip(self, raw_input, credential))]
    pub async fn search_users(
        &self,
        raw_input: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<SearchUsersResponse, ApiOpsError> {
        super::require_connection(server, credential)?;

        let parsed = parse_search_input(raw_input);
        if parsed.is_empty() && parsed.errors.is_empty() {
            return Err(ApiOpsError::Validation(
                "No search input provided".to_string(),
            ));
        }

        let mut users = Vec::new();
        let mut errors = parsed.errors;

        for line in &parsed.lines {
            match self.gateway.search(&line.term, server, credential).await {
                Ok(records) if records.is_empty() => {
                    users.push(UserResult::not_found(line));
                    errors.push(format!("No users found for search term '{}'.", line.term));
                }
                Ok(records) => {
                    users.extend(records.into_iter().map(|rec| merge(rec, line)));
                }
                Err(err) => {
                    warn!(term = %line.term, error = %err, "directory search failed");
                    users.push(UserResult::search_failed(line));
                    errors.push(format!("Search failed for '{}': {err}", line.term));
                }
            }
        }

        info!(
            lines = parsed.lines.len(),
            results = users.len(),
            errors = errors.len(),
            "bulk search finished"
        );

        Ok(SearchUsersResponse {
            success: errors.is_empty(),
            total_users: users.len(),
            users,
            errors: (!errors.is_empty()).then_some(errors),
        })
    }
}

/// Merge one directory record with the tags of its originating line.
///
/// Missing directory fields render as "N/A" except the account id, which
/// falls back to the search term so downstream actions still have a handle.
fn merge(record: DirectoryRecord, line: &SearchLine) -> UserResult {
    let or_na = |field: Option<String>| field.unwrap_or_else(|| "N/A".to_string());

    UserResult {
        name: or_na(record.name),
        sam_account_name: record.sam_account_name.unwrap_or_else(|| line.term.clone()),
        user_principal_name: or_na(record.user_principal_name),
        distinguished_name: or_na(record.distinguished_name),
        is_disabled: !record.enabled,
        is_locked: record.locked_out,
        custom_field1: line.tag1.clone(),
        custom_field2: line.tag2.clone(),
        custom_field3: line.tag3.clone(),
        custom_field4: Some(line.term.clone()),
        status: dirops_core::ResultStatus::Found,
    }
}
