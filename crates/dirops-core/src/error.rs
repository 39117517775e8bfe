//! Error types for shared dirops functionality.

use thiserror::Error;

/// Errors raised while loading shared configuration data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credential profile file could not be read.
    #[error("failed to read credential profiles from '{path}': {source}")]
    ProfileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Credential profile file is not valid JSON.
    #[error("failed to parse credential profiles from '{path}': {source}")]
    ProfileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
