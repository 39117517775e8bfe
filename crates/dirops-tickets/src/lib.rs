//! Helpdesk ticketing: a small CRUD service over its own SQLite database.
//!
//! Tickets are independent of the directory operations surface; they share
//! only the HTTP server that mounts both routers.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod service;

pub use error::TicketError;
pub use router::tickets_router;
pub use service::TicketService;
