//! Route table for the ticketing service.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::service::TicketService;

/// Build the `/api/tickets` route table.
pub fn tickets_router(service: TicketService) -> Router {
    Router::new()
        .route(
            "/api/tickets",
            post(handlers::create_ticket).get(handlers::list_tickets),
        )
        .route(
            "/api/tickets/{id}",
            get(handlers::get_ticket)
                .put(handlers::update_ticket)
                .delete(handlers::delete_ticket),
        )
        .with_state(service)
}
