use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Sidecar router, mounted under `/api`.
pub fn create_api_routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/dns-resolutions",
            get(handlers::get_resolutions).post(handlers::record_resolution),
        );

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
