//! Transactional audit trail for directory operations.
//!
//! Every mutating action (bulk disable, unlock, password reset) that
//! succeeds against the directory leaves exactly one row here, written
//! inside a transaction that commits on normal completion and rolls back
//! on any failure, so no partial row is ever visible. Secrets are never
//! persisted; password resets record only a password-type tag.

mod error;
mod models;
mod store;

pub use error::AuditError;
pub use models::{
    AccountAction, ActionType, DisabledAccount, NewAccountAction, NewDisabledAccount,
};
pub use store::AuditStore;
