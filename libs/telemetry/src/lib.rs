//! Telemetry helpers for Greentic language generation.
//! Installs the tracing subscriber and provides generation spans and counters.

use anyhow::Result;

mod config;
mod context;
mod metrics;
mod span;
mod tracing_init;

pub use config::TelemetryConfig;
pub use context::GenerationLabels;
pub use metrics::record_counter;
pub use span::with_generation_span;
pub use tracing_init::init_telemetry;

/// Installs the subscriber configured from `LOG_FORMAT`, `LG_LOG_LEVEL` and `RUST_LOG`.
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(service_name))
}
