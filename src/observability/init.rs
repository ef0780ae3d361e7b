//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "slavgorod-bus";
const TRACE_FILE: &str = "slavgorod-bus-spans.jsonl";

/// Installs the global subscriber: an [`EnvFilter`] at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports spans to
/// `<data_dir>/slavgorod-bus-spans.jsonl`.
///
/// Does nothing if the data directory cannot be created. Only the first call
/// in a process takes effect.
///
/// ```rust
/// use slavgorod_bus::observability::init_tracing;
/// use slavgorod_bus::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let provider =
        tracer::create_tracer_provider(SERVICE_NAME, config.data_dir.join(TRACE_FILE));
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
