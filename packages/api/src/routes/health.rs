use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// False when the service started without a usable artifact
    pub model_loaded: bool,
}

/// Liveness check. Always 200; model availability is reported in the body.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
#[tracing::instrument(name = "GET /", skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_loaded: state.model_loaded(),
    })
}
