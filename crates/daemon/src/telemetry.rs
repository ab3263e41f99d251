//! Logging and OpenTelemetry setup

use crate::config::LogFormat;
use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "fingerprint=info";
const LOG_FILE_NAME: &str = "fingerprint-bridge.log";

/// Initialize the global subscriber
///
/// Console output is pretty or JSON. When `log_dir` is set, a daily-rolling
/// JSON log file is written as well; keep the returned guard alive so it
/// flushes on shutdown.
pub fn init_logging(format: LogFormat, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(otel_layer()?)
        .with(env_filter)
        .with(file_layer);

    match format {
        // Production: JSON structured logging
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        // Development: Pretty formatting with colors
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
    }

    Ok(guard)
}

/// Whether an OTLP endpoint is configured
///
/// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (e.g., http://localhost:4317)
/// - `OTEL_SERVICE_NAME`: Service name (default: fingerprint-bridge)
pub fn otel_requested() -> bool {
    std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok()
}

#[cfg(feature = "telemetry")]
fn otel_layer<S>() -> Result<Option<impl tracing_subscriber::Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;
    use opentelemetry_sdk::Resource;

    if !otel_requested() {
        return Ok(None);
    }

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "fingerprint-bridge".to_string());
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")?;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            service_name.clone(),
        )]))
        .build();

    let tracer = provider.tracer(service_name);
    opentelemetry::global::set_tracer_provider(provider);

    Ok(Some(tracing_opentelemetry::layer().with_tracer(tracer)))
}

#[cfg(not(feature = "telemetry"))]
fn otel_layer() -> Result<Option<tracing_subscriber::layer::Identity>> {
    Ok(None)
}
