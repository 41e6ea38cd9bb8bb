use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{generate_image, health_check};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/generate-image", post(generate_image))
        .route("/api/health", get(health_check));

    // Persisted images are served read-only
    if state.image_store.persists() {
        router.nest_service("/generated", ServeDir::new(state.image_store.output_dir()))
    } else {
        router
    }
}

/// Full application with CORS open to all origins and request tracing
pub fn build_app(state: AppState) -> Router {
    create_routes(state.clone())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
