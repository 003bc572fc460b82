use axum::{Router, extract::DefaultBodyLimit, routing::post};
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod routes;

pub mod error;
pub mod state;

pub use axum;
pub use routes::health::HealthResponse;
pub use routes::predict::{EMPTY_FILE, NO_FILE_SELECTED, NO_FILE_UPLOADED, PredictResponse};

pub fn construct_router(state: AppState) -> Router {
    construct_router_with(state, Router::new())
}

/// Builds the service router, merging `extra` routes under the same CORS,
/// body limit and tracing layers.
pub fn construct_router_with(state: AppState, extra: Router) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/predict", post(routes::predict::predict))
        .nest("/health", routes::health::routes())
        .with_state(state)
        .merge(extra)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
