//! Application route configuration.

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, rubric_routes, software_routes};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::DEFAULT_CORS_ORIGIN;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public authentication routes
        .nest("/auth", auth_routes())
        // Protected routes (require JWT)
        .nest(
            "/software",
            software_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/characteristics",
            rubric_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the single configured front-end origin, with credentials.
fn cors_layer(origin: &str) -> CorsLayer {
    let origin = origin.parse::<HeaderValue>().unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid CORS origin {:?}, falling back to {}",
            origin,
            DEFAULT_CORS_ORIGIN
        );
        HeaderValue::from_static(DEFAULT_CORS_ORIGIN)
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Root endpoint
async fn root() -> &'static str {
    "Quality Registry API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: ServiceStatus {
                    status: "healthy",
                    error: None,
                },
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
            }),
        ),
    }
}
