//! The gateway seam.
//!
//! Orchestration code depends on this trait rather than on the subprocess
//! implementation, so outcomes can be exercised in tests without a domain
//! controller.

use async_trait::async_trait;
use dirops_core::Credential;

use crate::error::GatewayError;
use crate::model::{ActionOutcome, DirectoryRecord, DisableOutcome};

/// The four logical directory operations.
///
/// Each call blocks its caller up to the operation's timeout; on expiry the
/// call is abandoned and reported as a failure, never retried. An empty
/// match list from `search` is a valid, non-error outcome.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Find users whose name OR account-id contains `term`.
    async fn search(
        &self,
        term: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<Vec<DirectoryRecord>, GatewayError>;

    /// Disable each listed account independently; one failure never aborts
    /// the others.
    async fn bulk_disable(
        &self,
        accounts: &[String],
        server: &str,
        credential: &Credential,
    ) -> Result<Vec<DisableOutcome>, GatewayError>;

    /// Unlock a single account.
    async fn unlock(
        &self,
        account: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<ActionOutcome, GatewayError>;

    /// Reset a single account's password. With `temporary` set, the account
    /// must change the password at next logon. Neither `new_password` nor
    /// the connecting credential may ever be logged or persisted.
    async fn reset_password(
        &self,
        account: &str,
        new_password: &str,
        temporary: bool,
        server: &str,
        credential: &Credential,
    ) -> Result<ActionOutcome, GatewayError>;
}
