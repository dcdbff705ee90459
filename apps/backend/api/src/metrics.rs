use axum::http::StatusCode;
use axum::response::IntoResponse;
use iris_api::{PREDICTION_DURATION_SECONDS, PREDICTION_REQUESTS_TOTAL};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace::TracerProvider};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const DEFAULT_LOG_FILTER: &str = "info";

pub fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    if let Some(tracer) = init_tracing() {
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(env_filter)
            .with(otel_layer)
            .init();
        tracing::info!("OpenTelemetry tracing enabled");
    } else {
        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(env_filter)
            .init();
        tracing::info!("OpenTelemetry tracing disabled (OTEL_EXPORTER_OTLP_ENDPOINT not set)");
    }
}

fn init_tracing() -> Option<opentelemetry_sdk::trace::Tracer> {
    let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&otlp_endpoint)
        .build()
        .ok()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .build();

    let tracer = provider.tracer("iris-api");
    opentelemetry::global::set_tracer_provider(provider);

    Some(tracer)
}

pub fn init_metrics() -> Result<(), BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(PREDICTION_DURATION_SECONDS.to_string()),
            &[0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1],
        )?
        .install_recorder()?;

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        tracing::warn!("Prometheus metrics already initialized");
        return Ok(());
    }

    metrics::describe_counter!(
        PREDICTION_REQUESTS_TOTAL,
        "Total number of prediction requests by outcome"
    );
    metrics::describe_histogram!(
        PREDICTION_DURATION_SECONDS,
        "Time spent in inference in seconds"
    );

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

pub async fn handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics not initialized".to_string(),
        ),
    }
}
