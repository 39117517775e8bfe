//! Ticketing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every ticketing error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("Ticket {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl IntoResponse for TicketError {
    fn into_response(self) -> Response {
        let status = match &self {
            TicketError::NotFound(_) => StatusCode::NOT_FOUND,
            TicketError::Validation(_) => StatusCode::BAD_REQUEST,
            TicketError::Database(_) | TicketError::Migration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = TicketError::NotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = TicketError::Validation("Subject too short".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
