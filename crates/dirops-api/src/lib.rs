//! HTTP surface and orchestration for directory operations.
//!
//! Endpoints:
//! - `POST /api/search-users` — bulk lookup from pasted operator input
//! - `POST /api/bulk-disable-users` — ticket-tracked bulk account disable
//! - `POST /api/unlock-user` — single account unlock
//! - `POST /api/reset-password` — single account password reset
//! - `GET /api/database-records` — recent audited actions
//! - `GET /api/disabled-accounts` — recent bulk-disable rows
//! - `GET /api/credentials` — connection profiles injected at startup

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::ApiOpsError;
pub use router::{ops_router, OpsState};
