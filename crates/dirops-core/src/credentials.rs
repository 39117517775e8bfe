//! Credential profiles and connection credentials.
//!
//! Profiles are loaded exactly once at process start from an explicitly
//! configured path. Nothing in dirops re-reads or rewrites the file while
//! the process is running.

use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

use crate::error::CoreError;

/// A username/password pair used to authenticate against a domain controller.
///
/// The password is redacted from `Debug` output; it must never appear in
/// logs or audit rows.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Domain logon name (e.g. `DOMAIN\\operator`).
    pub username: String,
    /// Plaintext password, held only for the duration of a request.
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A named connection profile for one managed domain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CredentialProfile {
    /// Human-readable label shown in pickers (e.g. "Corp Domain").
    #[serde(rename = "Program")]
    pub program: String,
    /// Domain controller address.
    #[serde(rename = "DomainControllerIP")]
    pub server_address: String,
    /// Domain logon name.
    #[serde(rename = "DomainUsername")]
    pub username: String,
    /// Domain password.
    #[serde(rename = "DomainPassword")]
    pub password: String,
}

/// Load credential profiles from a JSON file at process start.
///
/// The file holds an array of [`CredentialProfile`] objects. Missing or
/// unreadable files are an error; the caller decides whether profiles are
/// required at all.
pub fn load_profiles(path: &Path) -> Result<Vec<CredentialProfile>, CoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CoreError::ProfileRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CoreError::ProfileParse {
        path: path.display().to_string(),
        source,
    })
}
