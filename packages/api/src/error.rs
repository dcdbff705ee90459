use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::prediction::PredictionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportPolicy {
    Ignore,
    Report,
}

/// Transport error for every route.
///
/// Reported errors get a fresh id in the body and in the `x-error-id` header.
/// Constructors don't log; the failing operation has already done so.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    public_code: &'static str,
    public_message: Option<String>,
    report_policy: ReportPolicy,
}

impl ApiError {
    fn new(
        status: StatusCode,
        public_code: &'static str,
        public_message: Option<String>,
        report_policy: ReportPolicy,
    ) -> Self {
        Self {
            status,
            public_code,
            public_message,
            report_policy,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn public_code(&self) -> &str {
        self.public_code
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            Some(msg.into()),
            ReportPolicy::Ignore,
        )
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "UNPROCESSABLE_ENTITY",
            Some(msg.into()),
            ReportPolicy::Ignore,
        )
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            Some(msg.into()),
            ReportPolicy::Report,
        )
    }

    /// Inference failures keep their message in the response body.
    pub fn prediction_failed(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "PREDICTION_FAILED",
            Some(msg.into()),
            ReportPolicy::Report,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorEnvelope<'a> {
            error: ErrorBody<'a>,
        }

        #[derive(Serialize)]
        struct ErrorBody<'a> {
            code: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            id: Option<&'a str>,
            message: &'a str,
        }

        let public_message = self
            .public_message
            .as_deref()
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("Error"));

        let error_id = match self.report_policy {
            ReportPolicy::Report => Some(uuid::Uuid::new_v4().to_string()),
            ReportPolicy::Ignore => None,
        };

        let mut response = (
            self.status,
            Json(ErrorEnvelope {
                error: ErrorBody {
                    code: self.public_code,
                    id: error_id.as_deref(),
                    message: public_message,
                },
            }),
        )
            .into_response();

        if let Some(v) = error_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
            response.headers_mut().insert("x-error-id", v);
        }

        response
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::ModelUnavailable => Self::service_unavailable(err.to_string()),
            PredictionError::Validation { .. } => Self::bad_request(err.to_string()),
            PredictionError::Inference(_) => Self::prediction_failed(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        let msg = format!("Invalid request body: {}", err.body_text());
        tracing::warn!("Unprocessable entity: {}", msg);
        Self::unprocessable(msg)
    }
}

impl std::error::Error for ApiError {}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.public_code)
    }
}
