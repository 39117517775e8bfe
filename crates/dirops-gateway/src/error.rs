//! Gateway failure taxonomy.

use thiserror::Error;

/// Failures surfaced by the directory gateway.
///
/// A timed-out call is abandoned (the subprocess is killed), reported as a
/// failure for that operation only, and never retried.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The subprocess did not complete within the operation's timeout.
    #[error("directory command timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The directory-management shell binary is not installed or not on PATH.
    #[error("directory-management shell not found; ensure it is installed and on PATH")]
    Unavailable,

    /// The connecting credential lacks permission for the operation.
    #[error("authorization denied by the directory: {0}")]
    AuthorizationDenied(String),

    /// The directory reported a missing object (bad server, unknown identity).
    #[error("directory object not found: {0}")]
    NotFound(String),

    /// The subprocess produced structured output that could not be decoded.
    #[error("malformed directory response: {0}")]
    MalformedResponse(String),

    /// Any other subprocess or directory failure.
    #[error("directory command failed: {0}")]
    Failed(String),
}

impl GatewayError {
    /// Classify a failed command from its stderr text.
    ///
    /// Mirrors the diagnostic substrings the directory shell emits for the
    /// common failure modes.
    pub fn from_stderr(stderr: &str) -> Self {
        let detail = stderr.trim().to_string();
        if detail.contains("Access is denied") || detail.contains("insufficient access") {
            GatewayError::AuthorizationDenied(detail)
        } else if detail.contains("Cannot find an object") {
            GatewayError::NotFound(detail)
        } else {
            GatewayError::Failed(detail)
        }
    }
}
