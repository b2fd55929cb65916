//! API module
//!
//! HTTP API endpoints and middleware.

pub mod extract;
pub mod middleware;
pub mod routes;

use std::path::Path;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::service::AccountService;

pub use routes::create_router;

/// Build the application router
///
/// Layers run outermost first: request id, trace span, request log,
/// security headers, then the handler.
pub fn build_app(service: AccountService, static_dir: Option<&Path>) -> Router {
    let api_router =
        create_router().layer(axum::middleware::from_fn(middleware::api_version_middleware));

    let mut app = Router::new()
        .route("/health", get(health_check))
        .nest("/v1", api_router)
        .with_state(service);

    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(axum::middleware::from_fn(middleware::security_headers_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(axum::middleware::from_fn(middleware::logging_middleware)),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
