//! Subscriber setup.

use super::tracer::{self, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

static ACTIVE_TRACE_LEVEL: OnceLock<String> = OnceLock::new();

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "truckmap-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` feeding an OpenTelemetry layer that writes
/// `truckmap-otlp.json` in the plugin data directory.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs without a subscriber. Calling this more than once is harmless;
/// only the first subscriber is installed.
///
/// ```no_run
/// use truckmap::observability::init_tracing;
/// use truckmap::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("truckmap=debug".to_string()),
///     ..Config::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SCOPE)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
    if installed.is_ok() {
        let _ = ACTIVE_TRACE_LEVEL.set(level.to_string());
    }
}

/// Filter directive of the subscriber installed by [`init_tracing`] on this
/// thread's instance, if any.
///
/// Forwarded to the worker so its subscriber uses the same filter.
#[must_use]
pub fn active_trace_level() -> Option<&'static str> {
    ACTIVE_TRACE_LEVEL.get().map(String::as_str)
}
