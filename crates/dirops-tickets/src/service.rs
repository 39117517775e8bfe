//! Ticket persistence.

use std::str::FromStr;

use chrono::{TimeDelta, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, instrument};

use crate::error::TicketError;
use crate::models::{CreateTicketRequest, Ticket, TicketFilter, TicketStatus, UpdateTicketRequest};

/// Helpdesk-local timestamp (UTC+8), formatted the way the tickets table
/// has always stored it.
fn helpdesk_now() -> String {
    (Utc::now() + TimeDelta::hours(8))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// CRUD over the tickets database.
#[derive(Clone)]
pub struct TicketService {
    pool: SqlitePool,
}

impl TicketService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if missing) the tickets database at `url`.
    pub async fn connect(url: &str) -> Result<Self, TicketError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), TicketError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("tickets migrations applied");
        Ok(())
    }

    /// Create a ticket; new tickets always start Open.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError> {
        request.validate()?;

        let now = helpdesk_now();
        let result = sqlx::query(
            "INSERT INTO tickets \
             (name, email, subject, description, priority, status, notes, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.name.trim())
        .bind(request.email.trim())
        .bind(request.subject.trim())
        .bind(request.description.trim())
        .bind(request.priority.to_string())
        .bind(TicketStatus::Open.to_string())
        .bind(request.notes.as_deref().map(str::trim))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(id, "ticket created");
        self.get(id).await
    }

    /// All tickets, newest first, optionally filtered by status/priority.
    pub async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        let rows = match (&filter.status, &filter.priority) {
            (Some(status), Some(priority)) => {
                sqlx::query_as::<_, Ticket>(
                    "SELECT * FROM tickets WHERE status = ? AND priority = ? \
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(status.to_string())
                .bind(priority.to_string())
                .fetch_all(&self.pool)
                .await?
            }
            (Some(status), None) => {
                sqlx::query_as::<_, Ticket>(
                    "SELECT * FROM tickets WHERE status = ? ORDER BY created_at DESC, id DESC",
                )
                .bind(status.to_string())
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(priority)) => {
                sqlx::query_as::<_, Ticket>(
                    "SELECT * FROM tickets WHERE priority = ? ORDER BY created_at DESC, id DESC",
                )
                .bind(priority.to_string())
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_as::<_, Ticket>(
                    "SELECT * FROM tickets ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Ticket, TicketError> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(TicketError::NotFound(id))
    }

    /// Partial update of status and/or notes; `updated_at` always advances.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: UpdateTicketRequest) -> Result<Ticket, TicketError> {
        update.validate()?;

        // Existence check first so a bad id is a 404, not a silent no-op.
        let _ = self.get(id).await?;

        match (&update.status, &update.notes) {
            (Some(status), Some(notes)) => {
                sqlx::query("UPDATE tickets SET status = ?, notes = ?, updated_at = ? WHERE id = ?")
                    .bind(status.to_string())
                    .bind(notes.trim())
                    .bind(helpdesk_now())
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            }
            (Some(status), None) => {
                sqlx::query("UPDATE tickets SET status = ?, updated_at = ? WHERE id = ?")
                    .bind(status.to_string())
                    .bind(helpdesk_now())
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            }
            (None, Some(notes)) => {
                sqlx::query("UPDATE tickets SET notes = ?, updated_at = ? WHERE id = ?")
                    .bind(notes.trim())
                    .bind(helpdesk_now())
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            }
            (None, None) => {}
        }

        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), TicketError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(TicketError::NotFound(id));
        }
        info!(id, "ticket deleted");
        Ok(())
    }
}
