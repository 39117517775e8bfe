//! CORS preflight behavior of the server's layer configuration.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::post,
    Router,
};
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};

fn app_with_cors() -> Router {
    // Same permissive layer the server installs.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/api/search-users", post(|| async { StatusCode::OK }))
        .layer(cors)
}

#[tokio::test]
async fn preflight_is_allowed_for_any_origin() {
    let app = app_with_cors();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/search-users")
                .header(header::ORIGIN, "http://helpdesk.corp.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
