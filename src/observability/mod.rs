//! Tracing setup with OTLP JSON file export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → OTLP file exporter → zodo-otlp.json
//! ```
//!
//! The file lives in the data directory, next to `todos.json`, and rotates at
//! 10 MiB keeping three backups. The level comes from the `trace_level`
//! config option and defaults to `info`.
//!
//! ```no_run
//! use zodo::observability::init_tracing;
//! use zodo::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod exporter;
mod rotating;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "zodo-otlp.json";

/// Level used when the config does not set one.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber. Only the first call on a thread's process
/// takes effect. Tracing is optional, so failures are swallowed.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .as_deref()
        .unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        exporter::SCOPE_NAME,
    )]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
