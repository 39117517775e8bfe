//! Orchestration services.

mod account_service;
mod search_service;

pub use account_service::AccountService;
pub use search_service::SearchService;

use dirops_core::Credential;

use crate::error::ApiOpsError;

/// Reject a request whose connection fields are empty before any
/// directory call is made.
pub(crate) fn require_connection(
    server: &str,
    credential: &Credential,
) -> Result<(), ApiOpsError> {
    if server.trim().is_empty()
        || credential.username.trim().is_empty()
        || credential.password.is_empty()
    {
        return Err(ApiOpsError::Validation(
            "Missing required credentials".to_string(),
        ));
    }
    Ok(())
}
