//! Iris prediction HTTP API
//!
//! `GET /` reports liveness and whether a model is loaded, `POST /predict`
//! classifies one flower and `GET /openapi.json` serves the API document.

use axum::{
    Json, Router,
    routing::{get, post},
};
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub mod error;
pub mod openapi;
pub mod prediction;
mod routes;
pub mod state;

pub use axum;
pub use prediction::{PredictionError, PredictionRequest, PredictionResponse};
pub use routes::health::HealthResponse;
pub use routes::predict::{PREDICTION_DURATION_SECONDS, PREDICTION_REQUESTS_TOTAL};
pub use state::State;

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::health))
        .route("/predict", post(routes::predict::predict))
        .with_state(state)
        .route(
            "/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
