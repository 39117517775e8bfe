//! CLI error types and exit codes.

use thiserror::Error;

/// Exit codes:
/// - 0: success
/// - 1: general error
/// - 2: directory call failed
/// - 3: aborted by the operator
/// - 4: validation error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Directory error: {0}")]
    Gateway(#[from] dirops_gateway::GatewayError),

    #[error("Audit database error: {0}")]
    Audit(#[from] dirops_audit::AuditError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Aborted.")]
    Aborted,
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Gateway(_) => 2,
            CliError::Aborted => 3,
            CliError::Validation(_) => 4,
            _ => 1,
        }
    }

    pub fn print(&self) {
        if std::env::var("NO_COLOR").is_err() {
            eprintln!("\x1b[31mError:\x1b[0m {self}");
        } else {
            eprintln!("Error: {self}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirops_gateway::GatewayError;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(CliError::Aborted.exit_code(), 3);
        assert_eq!(CliError::Validation("x".into()).exit_code(), 4);
        assert_eq!(
            CliError::Gateway(GatewayError::Timeout { seconds: 30 }).exit_code(),
            2
        );
    }
}
