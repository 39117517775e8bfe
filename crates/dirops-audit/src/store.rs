//! The audit store: a SQLite database reached via a file connection string.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, instrument};

use crate::error::AuditError;
use crate::models::{AccountAction, DisabledAccount, NewAccountAction, NewDisabledAccount};

/// Transactional persistence for operation audit records.
///
/// The store imposes no locking beyond SQLite's native isolation; the
/// transaction wrapping each logical write is the unit of atomicity.
#[derive(Clone)]
pub struct AuditStore {
    pool: SqlitePool,
}

impl AuditStore {
    /// Wrap an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if missing) a store at `url`,
    /// e.g. `sqlite://db/user_operations.db`.
    pub async fn connect(url: &str) -> Result<Self, AuditError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Apply embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AuditError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("audit store migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Record one bulk-disable batch in a single transaction.
    ///
    /// Commits only if every row inserts; any failure rolls the whole
    /// batch back and re-raises, so no partial batch is ever visible.
    /// Returns the number of rows written.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn record_disabled_accounts(
        &self,
        ticket_number: &str,
        domain_username: &str,
        rows: &[NewDisabledAccount],
    ) -> Result<u64, AuditError> {
        if ticket_number.trim().is_empty() {
            return Err(AuditError::Validation(
                "ticket_number must not be empty".to_string(),
            ));
        }
        if domain_username.trim().is_empty() {
            return Err(AuditError::Validation(
                "domain_username must not be empty".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let mut written = 0u64;
        for row in rows {
            if row.sam_account_name.trim().is_empty() {
                return Err(AuditError::Validation(
                    "sam_account_name must not be empty".to_string(),
                ));
            }
            sqlx::query(
                "INSERT INTO disabled_accounts \
                 (eid, program, ticket_number, name, sam_account_name, \
                  user_principal_name, domain_username, timestamp) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&row.eid)
            .bind(&row.program)
            .bind(ticket_number)
            .bind(&row.name)
            .bind(&row.sam_account_name)
            .bind(&row.user_principal_name)
            .bind(domain_username)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
            written += 1;
        }
        tx.commit().await?;

        info!(ticket_number, written, "recorded disabled accounts");
        Ok(written)
    }

    /// Record one unlock/reset action in its own transaction.
    ///
    /// Returns the row id. `additional_details`, when present, is stored
    /// as compact JSON text; callers must never place a secret in it.
    #[instrument(skip(self, action), fields(action_type = %action.action_type))]
    pub async fn record_action(&self, action: NewAccountAction) -> Result<i64, AuditError> {
        if action.sam_account_name.trim().is_empty() {
            return Err(AuditError::Validation(
                "sam_account_name must not be empty".to_string(),
            ));
        }
        if action.reference.trim().is_empty() {
            return Err(AuditError::Validation(
                "reference must not be empty".to_string(),
            ));
        }
        if action.domain_user.trim().is_empty() {
            return Err(AuditError::Validation(
                "domain_user must not be empty".to_string(),
            ));
        }

        let details = action
            .additional_details
            .as_ref()
            .map(serde_json::Value::to_string);

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO account_actions_log \
             (action_type, sam_account_name, reference, domain_user, \
              additional_details, timestamp) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(action.action_type.to_string())
        .bind(&action.sam_account_name)
        .bind(&action.reference)
        .bind(&action.domain_user)
        .bind(details)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    /// Most-recent-first action rows, optionally filtered by action type.
    pub async fn recent_actions(
        &self,
        limit: i64,
        action_type: Option<&str>,
    ) -> Result<Vec<AccountAction>, AuditError> {
        let rows = match action_type {
            Some(kind) => {
                sqlx::query_as::<_, AccountAction>(
                    "SELECT * FROM account_actions_log WHERE action_type = ? \
                     ORDER BY timestamp DESC, id DESC LIMIT ?",
                )
                .bind(kind)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AccountAction>(
                    "SELECT * FROM account_actions_log \
                     ORDER BY timestamp DESC, id DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Most-recent-first bulk-disable rows, optionally filtered by ticket.
    pub async fn recent_disabled(
        &self,
        limit: i64,
        ticket_number: Option<&str>,
    ) -> Result<Vec<DisabledAccount>, AuditError> {
        let rows = match ticket_number {
            Some(ticket) => {
                sqlx::query_as::<_, DisabledAccount>(
                    "SELECT * FROM disabled_accounts WHERE ticket_number = ? \
                     ORDER BY timestamp DESC, idx DESC LIMIT ?",
                )
                .bind(ticket)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DisabledAccount>(
                    "SELECT * FROM disabled_accounts \
                     ORDER BY timestamp DESC, idx DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionType;
    use serde_json::json;

    async fn test_store() -> AuditStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = AuditStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    fn unlock_action(account: &str, reference: &str) -> NewAccountAction {
        NewAccountAction {
            action_type: ActionType::UnlockAccount,
            sam_account_name: account.to_string(),
            reference: reference.to_string(),
            domain_user: "CORP\\op".to_string(),
            additional_details: None,
        }
    }

    fn disabled_row(account: &str) -> NewDisabledAccount {
        NewDisabledAccount {
            eid: Some("EID1".to_string()),
            program: Some("Finance".to_string()),
            name: "John Smith".to_string(),
            sam_account_name: account.to_string(),
            user_principal_name: Some(format!("{account}@corp.example")),
        }
    }

    #[tokio::test]
    async fn record_action_and_read_back() {
        let store = test_store().await;
        let id = store.record_action(unlock_action("jsmith", "INC-1")).await.unwrap();
        assert!(id > 0);

        let rows = store.recent_actions(10, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].action_type, "UNLOCK_ACCOUNT");
        assert_eq!(rows[0].sam_account_name, "jsmith");
        assert_eq!(rows[0].reference, "INC-1");
    }

    #[tokio::test]
    async fn recent_actions_is_most_recent_first() {
        let store = test_store().await;
        for i in 0..3 {
            store
                .record_action(unlock_action(&format!("user{i}"), "INC-2"))
                .await
                .unwrap();
        }
        let rows = store.recent_actions(10, None).await.unwrap();
        let accounts: Vec<&str> = rows.iter().map(|r| r.sam_account_name.as_str()).collect();
        assert_eq!(accounts, vec!["user2", "user1", "user0"]);
    }

    #[tokio::test]
    async fn recent_actions_filters_by_type_and_respects_limit() {
        let store = test_store().await;
        store.record_action(unlock_action("a", "INC-3")).await.unwrap();
        let mut reset = unlock_action("b", "INC-3");
        reset.action_type = ActionType::ResetPassword;
        reset.additional_details = Some(json!({
            "password_type": "temporary",
            "change_at_logon": true
        }));
        store.record_action(reset).await.unwrap();

        let resets = store
            .recent_actions(10, Some("RESET_PASSWORD"))
            .await
            .unwrap();
        assert_eq!(resets.len(), 1);
        assert_eq!(
            resets[0].details_json().unwrap()["password_type"],
            "temporary"
        );

        let limited = store.recent_actions(1, None).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn record_action_rejects_empty_required_fields() {
        let store = test_store().await;
        let err = store.record_action(unlock_action("", "INC-4")).await.unwrap_err();
        assert!(matches!(err, AuditError::Validation(_)));
        let err = store.record_action(unlock_action("jsmith", " ")).await.unwrap_err();
        assert!(matches!(err, AuditError::Validation(_)));
        assert!(store.recent_actions(10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bulk_batch_commits_as_a_unit() {
        let store = test_store().await;
        let rows = vec![disabled_row("a1"), disabled_row("a2")];
        let written = store
            .record_disabled_accounts("TICKET-7", "CORP\\op", &rows)
            .await
            .unwrap();
        assert_eq!(written, 2);

        let back = store.recent_disabled(10, Some("TICKET-7")).await.unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].domain_username, "CORP\\op");
    }

    #[tokio::test]
    async fn failing_row_rolls_back_the_whole_batch() {
        let store = test_store().await;
        let rows = vec![disabled_row("a1"), disabled_row("")];
        let err = store
            .record_disabled_accounts("TICKET-8", "CORP\\op", &rows)
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::Validation(_)));
        // The first row must not be visible: the batch is atomic.
        assert!(store.recent_disabled(10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_requires_ticket_and_operator() {
        let store = test_store().await;
        let rows = vec![disabled_row("a1")];
        assert!(store
            .record_disabled_accounts("", "CORP\\op", &rows)
            .await
            .is_err());
        assert!(store
            .record_disabled_accounts("TICKET-9", "", &rows)
            .await
            .is_err());
    }
}
