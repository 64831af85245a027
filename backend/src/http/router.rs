//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The dashboard is served from a different origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Dogs
        .route("/dogs", get(handlers::list_dogs).post(handlers::create_dog))
        .route(
            "/dogs/{id}",
            get(handlers::get_dog)
                .patch(handlers::update_dog)
                .delete(handlers::delete_dog),
        )
        // Bathroom logs
        .route(
            "/bathroom-logs",
            get(handlers::list_bathroom_logs).post(handlers::create_bathroom_log),
        )
        .route("/bathroom-logs/stats", get(handlers::bathroom_stats))
        .route(
            "/bathroom-logs/{id}",
            patch(handlers::update_bathroom_log).delete(handlers::delete_bathroom_log),
        )
        // Feeding logs
        .route(
            "/feeding",
            get(handlers::list_feeding_logs).post(handlers::create_feeding_log),
        )
        .route(
            "/feeding/{id}",
            patch(handlers::update_feeding_log).delete(handlers::delete_feeding_log),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
