use crate::error::ApiError;
use crate::prediction::{self, PredictionError, PredictionRequest, PredictionResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::time::Instant;

pub const PREDICTION_REQUESTS_TOTAL: &str = "prediction_requests_total";
pub const PREDICTION_DURATION_SECONDS: &str = "prediction_duration_seconds";

#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Predicted species with class probabilities", body = PredictionResponse),
        (status = 400, description = "Feature vector does not have exactly 4 values"),
        (status = 422, description = "Body is not a valid prediction request"),
        (status = 500, description = "Inference failed"),
        (status = 503, description = "No model loaded")
    )
)]
#[tracing::instrument(name = "POST /predict", skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            record_outcome("rejected");
            return Err(rejection.into());
        }
    };

    let started = Instant::now();
    let result = prediction::predict(state.classifier(), &request);
    metrics::histogram!(PREDICTION_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

    record_outcome(match &result {
        Ok(_) => "ok",
        Err(PredictionError::ModelUnavailable) => "unavailable",
        Err(PredictionError::Validation { .. }) => "invalid",
        Err(PredictionError::Inference(_)) => "error",
    });

    Ok(Json(result?))
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!(PREDICTION_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}
