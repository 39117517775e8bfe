//! HTTP handlers for the ticketing service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::TicketError;
use crate::models::{CreateTicketRequest, Ticket, TicketFilter, UpdateTicketRequest};
use crate::service::TicketService;

/// Open a new ticket.
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = "tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = Ticket),
        (status = 400, description = "Invalid field", body = crate::error::ErrorBody),
    )
)]
pub async fn create_ticket(
    State(service): State<TicketService>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<Ticket>), TicketError> {
    let ticket = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// All tickets, newest first.
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = "tickets",
    params(TicketFilter),
    responses(
        (status = 200, description = "Tickets", body = [Ticket]),
    )
)]
pub async fn list_tickets(
    State(service): State<TicketService>,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<Vec<Ticket>>, TicketError> {
    Ok(Json(service.list(&filter).await?))
}

/// One ticket by id.
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "tickets",
    params(("id" = i64, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "The ticket", body = Ticket),
        (status = 404, description = "No such ticket", body = crate::error::ErrorBody),
    )
)]
pub async fn get_ticket(
    State(service): State<TicketService>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, TicketError> {
    Ok(Json(service.get(id).await?))
}

/// Update a ticket's status and/or notes.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    tag = "tickets",
    params(("id" = i64, Path, description = "Ticket id")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Updated ticket", body = Ticket),
        (status = 400, description = "Invalid update", body = crate::error::ErrorBody),
        (status = 404, description = "No such ticket", body = crate::error::ErrorBody),
    )
)]
pub async fn update_ticket(
    State(service): State<TicketService>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>, TicketError> {
    Ok(Json(service.update(id, update).await?))
}

/// Delete a ticket.
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = "tickets",
    params(("id" = i64, Path, description = "Ticket id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such ticket", body = crate::error::ErrorBody),
    )
)]
pub async fn delete_ticket(
    State(service): State<TicketService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TicketError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
