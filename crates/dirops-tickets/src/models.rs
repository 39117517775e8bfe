//! Ticket models and request validation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::TicketError;

/// Ticket lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "Open"),
            TicketStatus::InProgress => write!(f, "In Progress"),
            TicketStatus::Resolved => write!(f, "Resolved"),
            TicketStatus::Closed => write!(f, "Closed"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(TicketStatus::Open),
            "In Progress" => Ok(TicketStatus::InProgress),
            "Resolved" => Ok(TicketStatus::Resolved),
            "Closed" => Ok(TicketStatus::Closed),
            other => Err(format!("Invalid status: {other}")),
        }
    }
}

/// Ticket urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "Low"),
            TicketPriority::Medium => write!(f, "Medium"),
            TicketPriority::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(TicketPriority::Low),
            "Medium" => Ok(TicketPriority::Medium),
            "High" => Ok(TicketPriority::High),
            other => Err(format!("Invalid priority: {other}")),
        }
    }
}

/// A persisted ticket. Status and priority are stored as their display
/// strings so the table is readable with plain sqlite tooling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ticket {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub notes: Option<String>,
    /// Local helpdesk time (UTC+8), formatted `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /api/tickets`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateTicketRequest {
    /// Field-level validation, rejected before any database write.
    pub fn validate(&self) -> Result<(), TicketError> {
        let len = |s: &str| s.trim().chars().count();

        if !(2..=100).contains(&len(&self.name)) {
            return Err(TicketError::Validation(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(TicketError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        if !(5..=200).contains(&len(&self.subject)) {
            return Err(TicketError::Validation(
                "Subject must be between 5 and 200 characters".to_string(),
            ));
        }
        if !(10..=2000).contains(&len(&self.description)) {
            return Err(TicketError::Validation(
                "Description must be between 10 and 2000 characters".to_string(),
            ));
        }
        if let Some(notes) = &self.notes {
            if len(notes) > 2000 {
                return Err(TicketError::Validation(
                    "Notes must not exceed 2000 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Body of `PUT /api/tickets/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTicketRequest {
    pub status: Option<TicketStatus>,
    pub notes: Option<String>,
}

impl UpdateTicketRequest {
    pub fn validate(&self) -> Result<(), TicketError> {
        if self.status.is_none() && self.notes.is_none() {
            return Err(TicketError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }
        if let Some(notes) = &self.notes {
            if notes.trim().chars().count() > 2000 {
                return Err(TicketError::Validation(
                    "Notes must not exceed 2000 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Query parameters of `GET /api/tickets`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}
