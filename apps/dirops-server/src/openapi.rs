//! `OpenAPI` documentation and Swagger UI configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::health::HealthResponse;

/// `OpenAPI` documentation for the dirops server.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "dirops API",
        version = "0.3.0",
        description = "Bulk directory operations, audit records and helpdesk ticketing"
    ),
    paths(
        crate::health::health_handler,
        dirops_api::handlers::search::search_users,
        dirops_api::handlers::bulk_disable::bulk_disable_users,
        dirops_api::handlers::unlock::unlock_user,
        dirops_api::handlers::reset_password::reset_password,
        dirops_api::handlers::records::database_records,
        dirops_api::handlers::records::disabled_accounts,
        dirops_api::handlers::credentials::list_credentials,
        dirops_tickets::handlers::create_ticket,
        dirops_tickets::handlers::list_tickets,
        dirops_tickets::handlers::get_ticket,
        dirops_tickets::handlers::update_ticket,
        dirops_tickets::handlers::delete_ticket,
    ),
    components(schemas(
        HealthResponse,
        dirops_core::UserResult,
        dirops_core::ResultStatus,
        dirops_core::CredentialProfile,
        dirops_api::models::SearchUsersRequest,
        dirops_api::models::SearchUsersResponse,
        dirops_api::models::BulkDisableRequest,
        dirops_api::models::BulkDisableResponse,
        dirops_api::models::DisableResult,
        dirops_api::models::UnlockUserRequest,
        dirops_api::models::ResetPasswordRequest,
        dirops_api::models::ActionResponse,
        dirops_api::models::ActionRecord,
        dirops_api::models::RecordsResponse,
        dirops_api::models::DisabledRecord,
        dirops_api::models::DisabledRecordsResponse,
        dirops_api::error::ErrorBody,
        dirops_api::handlers::credentials::CredentialsResponse,
        dirops_tickets::models::Ticket,
        dirops_tickets::models::TicketStatus,
        dirops_tickets::models::TicketPriority,
        dirops_tickets::models::CreateTicketRequest,
        dirops_tickets::models::UpdateTicketRequest,
    )),
    tags(
        (name = "health", description = "Service health and status"),
        (name = "directory", description = "Bulk directory operations"),
        (name = "audit", description = "Persisted operation records"),
        (name = "tickets", description = "Helpdesk ticketing"),
    )
)]
pub struct ApiDoc;

/// Swagger UI routes serving the generated spec.
pub fn swagger_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
