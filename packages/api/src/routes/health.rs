use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `loaded` or `unavailable`
    pub model: String,
}

fn respond(state: &AppState, status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.classifier.model().status().to_string(),
    })
}

#[tracing::instrument(name = "GET /health/live", skip(state))]
pub async fn liveness(State(state): State<AppState>) -> Json<HealthResponse> {
    respond(&state, "healthy")
}

// Ready even without a model: predictions fall back instead of failing.
#[tracing::instrument(name = "GET /health/ready", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> Json<HealthResponse> {
    respond(&state, "ready")
}
