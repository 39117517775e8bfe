//! Audit store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// Required field missing on a row; rejected before any write.
    #[error("invalid audit record: {0}")]
    Validation(String),

    /// Underlying database failure. The enclosing transaction has already
    /// been rolled back when this surfaces.
    #[error("audit store error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure at startup.
    #[error("audit store migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
