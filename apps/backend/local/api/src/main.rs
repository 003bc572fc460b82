#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use cropdoc_api::{construct_router_with, state::State};
use cropdoc_classifier::Classifier;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod metrics;

async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    metrics::record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    metrics::init_telemetry()?;

    tracing::info!("Starting CropDoc AI Service");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: model_path={}, max_upload_bytes={}",
        config.model_path.display(),
        config.max_upload_bytes
    );

    let model_path = config.model_path.clone();
    let classifier = tokio::task::spawn_blocking(move || Classifier::load(model_path)).await?;
    metrics::record_model_status(classifier.model().is_loaded());

    let state = Arc::new(State::new(classifier).with_max_upload_bytes(config.max_upload_bytes));

    let app = construct_router_with(state, Router::new().route("/metrics", get(metrics::handler)))
        .layer(middleware::from_fn(metrics_middleware));

    let addr = config.addr();
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
