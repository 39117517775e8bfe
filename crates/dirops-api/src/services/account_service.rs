//! Account mutation orchestration: bulk disable, unlock, password reset.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use dirops_audit::{ActionType, AuditStore, NewAccountAction, NewDisabledAccount};
use dirops_core::{Credential, UserResult};
use dirops_gateway::DirectoryGateway;

use crate::error::ApiOpsError;
use crate::models::{ActionResponse, BulkDisableResponse, DisableResult};

/// Runs mutating account operations through the gateway and records the
/// outcomes in the audit store.
pub struct AccountService {
    gateway: Arc<dyn DirectoryGateway>,
    audit: AuditStore,
}

impl AccountService {
    pub fn new(gateway: Arc<dyn DirectoryGateway>, audit: AuditStore) -> Self {
        Self { gateway, audit }
    }

    /// Disable a batch of accounts, then audit the successful ones.
    ///
    /// Validation happens before any gateway call. Audit rows are matched
    /// back to `user_details` by account id; a success with no matching
    /// detail record is skipped silently (the caller sent no metadata for
    /// it). All matched rows commit in one transaction.
    #[instrument(skip(self, accounts, details, credential), fields(accounts = accounts.len()))]
    pub async fn bulk_disable(
        &self,
        accounts: &[String],
        ticket_number: &str,
        details: &[UserResult],
        server: &str,
        credential: &Credential,
    ) -> Result<BulkDisableResponse, ApiOpsError> {
        super::require_connection(server, credential)?;
        if accounts.is_empty() {
            return Err(ApiOpsError::Validation(
                "No user accounts provided".to_string(),
            ));
        }
        if ticket_number.trim().is_empty() {
            return Err(ApiOpsError::Validation(
                "Ticket number is required".to_string(),
            ));
        }

        let outcomes = self
            .gateway
            .bulk_disable(accounts, server, credential)
            .await?;

        let audit_rows: Vec<NewDisabledAccount> = outcomes
            .iter()
            .filter(|o| o.success)
            .filter_map(|o| {
                details
                    .iter()
                    .find(|d| d.sam_account_name == o.account)
                    .map(|d| NewDisabledAccount {
                        eid: d.custom_field1.clone(),
                        program: d.custom_field3.clone(),
                        name: d.name.clone(),
                        sam_account_name: d.sam_account_name.clone(),
                        user_principal_name: Some(d.user_principal_name.clone()),
                    })
            })
            .collect();

        if !audit_rows.is_empty() {
            self.audit
                .record_disabled_accounts(ticket_number, &credential.username, &audit_rows)
                .await?;
        }

        let results: Vec<DisableResult> = outcomes.into_iter().map(DisableResult::from).collect();
        let succeeded = results.iter().filter(|r| r.success).count();
        let failed = results.len() - succeeded;

        info!(ticket_number, succeeded, failed, "bulk disable finished");

        Ok(BulkDisableResponse {
            success: failed == 0,
            total: results.len(),
            succeeded,
            failed,
            results,
            ticket_number: ticket_number.to_string(),
        })
    }

    /// Unlock one account. A gateway-reported failure comes back as
    /// `{success: false, message}` rather than an error status; only a
    /// successful unlock writes an audit row.
    #[instrument(skip(self, credential))]
    pub async fn unlock(
        &self,
        sam_account_name: &str,
        reference: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<ActionResponse, ApiOpsError> {
        super::require_connection(server, credential)?;
        if sam_account_name.trim().is_empty() {
            return Err(ApiOpsError::Validation(
                "Account name is required".to_string(),
            ));
        }
        if reference.trim().is_empty() {
            return Err(ApiOpsError::Validation(
                "Reference number is required".to_string(),
            ));
        }

        let outcome = self
            .gateway
            .unlock(sam_account_name, server, credential)
            .await?;

        if outcome.success {
            self.audit
                .record_action(NewAccountAction {
                    action_type: ActionType::UnlockAccount,
                    sam_account_name: sam_account_name.to_string(),
                    reference: reference.to_string(),
                    domain_user: credential.username.clone(),
                    additional_details: None,
                })
                .await?;
        } else {
            warn!(account = sam_account_name, message = %outcome.message, "unlock failed");
        }

        Ok(outcome.into())
    }

    /// Reset one account's password. The audit row carries only the
    /// password type and change-at-logon flag; never the password itself.
    #[instrument(skip(self, new_password, credential))]
    pub async fn reset_password(
        &self,
        sam_account_name: &str,
        new_password: &str,
        is_temporary: bool,
        reference: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<ActionResponse, ApiOpsError> {
        super::require_connection(server, credential)?;
        if sam_account_name.trim().is_empty() {
            return Err(ApiOpsError::Validation(
                "Account name is required".to_string(),
            ));
        }
        if new_password.is_empty() {
            return Err(ApiOpsError::Validation(
                "New password is required".to_string(),
            ));
        }
        if reference.trim().is_empty() {
            return Err(ApiOpsError::Validation(
                "Reference number is required".to_string(),
            ));
        }

        let outcome = self
            .gateway
            .reset_password(sam_account_name, new_password, is_temporary, server, credential)
            .await?;

        if outcome.success {
            let password_type = if is_temporary { "temporary" } else { "permanent" };
            self.audit
                .record_action(NewAccountAction {
                    action_type: ActionType::ResetPassword,
                    sam_account_name: sam_account_name.to_string(),
                    reference: reference.to_string(),
                    domain_user: credential.username.clone(),
                    additional_details: Some(json!({
                        "password_type": password_type,
                        "change_at_logon": is_temporary,
                    })),
                })
                .await?;
        } else {
            warn!(account = sam_account_name, message = %outcome.message, "password reset failed");
        }

        Ok(outcome.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockGateway;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_audit() -> AuditStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = AuditStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    fn credential() -> Credential {
        Credential {
            username: "CORP\\helpdesk".to_string(),
            password: "pw".to_string(),
        }
    }

    fn detail(sam: &str) -> UserResult {
        let json = serde_json::json!({
            "Name": format!("User {sam}"),
            "SamAccountName": sam,
            "UserPrincipalName": format!("{sam}@corp.example"),
            "DistinguishedName": format!("CN={sam}"),
            "IsDisabled": false,
            "IsLocked": false,
            "CustomField1": "EID1",
            "CustomField3": "Finance",
        });
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn bulk_disable_audits_successful_accounts() {
        let audit = test_audit().await;
        let svc = AccountService::new(Arc::new(MockGateway::default()), audit.clone());

        let accounts = vec!["a1".to_string(), "a2".to_string()];
        let details = vec![detail("a1"), detail("a2")];
        let resp = svc
            .bulk_disable(&accounts, "TICKET-1", &details, "dc01", &credential())
            .await
            .unwrap();

        assert!(resp.success);
        assert_eq!(resp.succeeded, 2);
        let rows = audit.recent_disabled(10, Some("TICKET-1")).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].domain_username, "CORP\\helpdesk");
        assert_eq!(rows[0].program.as_deref(), Some("Finance"));
    }

    #[tokio::test]
    async fn failed_account_is_reported_and_not_audited() {
        let audit = test_audit().await;
        let mut gateway = MockGateway::default();
        gateway.disable_failures.push("a2".to_string());
        let svc = AccountService::new(Arc::new(gateway), audit.clone());

        let accounts = vec!["a1".to_string(), "a2".to_string()];
        let details = vec![detail("a1"), detail("a2")];
        let resp = svc
            .bulk_disable(&accounts, "TICKET-2", &details, "dc01", &credential())
            .await
            .unwrap();

        assert!(!resp.success);
        assert_eq!(resp.succeeded, 1);
        assert_eq!(resp.failed, 1);
        let rows = audit.recent_disabled(10, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sam_account_name, "a1");
    }

    #[tokio::test]
    async fn success_without_detail_record_is_skipped_silently() {
        let audit = test_audit().await;
        let svc = AccountService::new(Arc::new(MockGateway::default()), audit.clone());

        let accounts = vec!["a1".to_string()];
        let resp = svc
            .bulk_disable(&accounts, "TICKET-3", &[], "dc01", &credential())
            .await
            .unwrap();

        assert!(resp.success);
        assert!(audit.recent_disabled(10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bulk_disable_rejects_empty_inputs_before_gateway() {
        let audit = test_audit().await;
        let gateway = Arc::new(MockGateway::default());
        let svc = AccountService::new(gateway.clone(), audit);

        let err = svc
            .bulk_disable(&[], "TICKET-4", &[], "dc01", &credential())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiOpsError::Validation(_)));

        let accounts = vec!["a1".to_string()];
        let err = svc
            .bulk_disable(&accounts, "  ", &[], "dc01", &credential())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiOpsError::Validation(_)));

        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected_before_any_gateway_call() {
        let audit = test_audit().await;
        let gateway = Arc::new(MockGateway::default());
        let svc = AccountService::new(gateway.clone(), audit);

        let empty = Credential::new("", "");
        let accounts = vec!["a1".to_string()];
        assert!(matches!(
            svc.bulk_disable(&accounts, "TICKET-5", &[], "dc01", &empty)
                .await
                .unwrap_err(),
            ApiOpsError::Validation(_)
        ));
        assert!(matches!(
            svc.unlock("jsmith", "INC-5", "dc01", &empty).await.unwrap_err(),
            ApiOpsError::Validation(_)
        ));
        assert!(matches!(
            svc.reset_password("jsmith", "pw", false, "INC-5", "", &credential())
                .await
                .unwrap_err(),
            ApiOpsError::Validation(_)
        ));

        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_unlock_writes_one_action_row() {
        let audit = test_audit().await;
        let mut gateway = MockGateway::default();
        gateway.unlock_succeeds = true;
        let svc = AccountService::new(Arc::new(gateway), audit.clone());

        let resp = svc
            .unlock("jsmith", "INC-9", "dc01", &credential())
            .await
            .unwrap();
        assert!(resp.success);

        let rows = audit.recent_actions(10, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].action_type, "UNLOCK_ACCOUNT");
        assert_eq!(rows[0].reference, "INC-9");
    }

    #[tokio::test]
    async fn failed_unlock_returns_message_and_skips_audit() {
        let audit = test_audit().await;
        let svc = AccountService::new(Arc::new(MockGateway::default()), audit.clone());

        let resp = svc
            .unlock("jsmith", "INC-10", "dc01", &credential())
            .await
            .unwrap();
        assert!(!resp.success);
        assert!(resp.message.contains("Failed to unlock"));
        assert!(audit.recent_actions(10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_audit_row_never_contains_the_password() {
        let audit = test_audit().await;
        let svc = AccountService::new(Arc::new(MockGateway::default()), audit.clone());

        let resp = svc
            .reset_password("jsmith", "Hunter2!Secret", true, "INC-11", "dc01", &credential())
            .await
            .unwrap();
        assert!(resp.success);

        let rows = audit.recent_actions(10, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        let details = rows[0].additional_details.as_deref().unwrap();
        assert!(!details.contains("Hunter2"));
        let json = rows[0].details_json().unwrap();
        assert_eq!(json["password_type"], "temporary");
        assert_eq!(json["change_at_logon"], true);
    }

    #[tokio::test]
    async fn reset_requires_password_and_reference() {
        let audit = test_audit().await;
        let svc = AccountService::new(Arc::new(MockGateway::default()), audit);

        let err = svc
            .reset_password("jsmith", "", false, "INC-12", "dc01", &credential())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiOpsError::Validation(_)));

        let err = svc
            .reset_password("jsmith", "pw", false, "", "dc01", &credential())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiOpsError::Validation(_)));
    }
}
