//! Route table and shared state for the directory operations API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use dirops_audit::AuditStore;
use dirops_core::CredentialProfile;
use dirops_gateway::DirectoryGateway;

use crate::handlers;
use crate::services::{AccountService, SearchService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct OpsState {
    pub search: Arc<SearchService>,
    pub accounts: Arc<AccountService>,
    pub audit: AuditStore,
    /// Connection profiles loaded once at startup; empty when unconfigured.
    pub credentials: Arc<Vec<CredentialProfile>>,
}

impl OpsState {
    pub fn new(
        gateway: Arc<dyn DirectoryGateway>,
        audit: AuditStore,
        credentials: Vec<CredentialProfile>,
    ) -> Self {
        Self {
            search: Arc::new(SearchService::new(gateway.clone())),
            accounts: Arc::new(AccountService::new(gateway, audit.clone())),
            audit,
            credentials: Arc::new(credentials),
        }
    }
}

/// Build the `/api` route table for directory operations.
pub fn ops_router(state: OpsState) -> Router {
    Router::new()
        .route("/api/search-users", post(handlers::search::search_users))
        .route(
            "/api/bulk-disable-users",
            post(handlers::bulk_disable::bulk_disable_users),
        )
        .route("/api/unlock-user", post(handlers::unlock::unlock_user))
        .route(
            "/api/reset-password",
            post(handlers::reset_password::reset_password),
        )
        .route(
            "/api/database-records",
            get(handlers::records::database_records),
        )
        .route(
            "/api/disabled-accounts",
            get(handlers::records::disabled_accounts),
        )
        .route(
            "/api/credentials",
            get(handlers::credentials::list_credentials),
        )
        .with_state(state)
}
