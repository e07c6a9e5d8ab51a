use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{request_span, track_request};

use super::{categories, locations, recommendations, AppState};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(middleware::from_fn(track_request))
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", post(locations::create).get(locations::list))
        .route("/locations/:id", get(locations::get_by_id))
        .route("/categories", post(categories::create).get(categories::list))
        .route("/recommendations", get(recommendations::list))
        .route(
            "/recommendations/mark-reviewed",
            post(recommendations::mark_reviewed),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
