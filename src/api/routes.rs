//! Router configuration for the API.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{agencies, auth, health, inspections};
use crate::api::middleware::{
    REQUEST_ID_HEADER, auth_middleware, error_response_middleware, logging_middleware,
    request_id_middleware,
};
use crate::config::ServerConfig;
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Outermost first:
/// 1. CORS
/// 2. Request ID - generates/propagates `x-request-id`
/// 3. Logging - `http_request` span with the request ID
/// 4. Error rendering - JSON error bodies carrying the request ID
/// 5. Request timeout
///
/// Resource routes additionally sit behind `auth_middleware`.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let protected = OpenApiRouter::new()
        .merge(agencies::agency_routes())
        .merge(inspections::inspection_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(protected)
        .merge(auth::auth_routes())
        .merge(health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout)))
        .layer(middleware::from_fn(error_response_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&server.cors_allowed_origins))
        .with_state(state)
}

/// An empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::HeaderName::from_static(REQUEST_ID_HEADER)]);

    if allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(origins)
}
