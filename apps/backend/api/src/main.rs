#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use axum::Router;
use iris_api::{construct_router, state::State};
use std::sync::Arc;

mod config;
mod metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    metrics::init_telemetry();

    tracing::info!("Starting Iris prediction API service");

    let config = config::Config::from_env()?;
    tracing::info!("Loading model from {}", config.model_dir.display());

    let state = Arc::new(State::from_load_result(iris_model::load_model(
        &config.model_dir,
    )));

    let app = construct_router(state);

    let addr = config.addr();
    tracing::info!("API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let Some(metrics_addr) = config.metrics_addr() else {
        tracing::info!("Metrics listener disabled (METRICS_PORT is empty)");
        axum::serve(listener, app).await?;
        return Ok(());
    };

    metrics::init_metrics()?;
    let metrics_app = Router::new().route("/metrics", axum::routing::get(metrics::handler));
    tracing::info!("Metrics listening on {}", metrics_addr);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr).await?;

    tokio::select! {
        res = axum::serve(listener, app) => res?,
        res = axum::serve(metrics_listener, metrics_app) => res?,
    }

    Ok(())
}
