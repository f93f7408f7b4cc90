use crate::config::Config;
use anyhow::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::env;
use tracing_stackdriver::CloudTraceConfiguration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,mtgstats_services=debug,mtgstats_grid=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// Local runs print human readable lines. Every other environment emits
/// Stackdriver JSON tied to Cloud Trace, which needs `GOOGLE_CLOUD_PROJECT`.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    if config.is_local() {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer())
            .try_init()?;
        return Ok(());
    }

    let project_id = env::var("GOOGLE_CLOUD_PROJECT").with_context(|| {
        format!(
            "GOOGLE_CLOUD_PROJECT environment variable is required in {} environment",
            config.environment()
        )
    })?;

    // W3C trace-context, read back by the request span in `routes`
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let stackdriver_layer =
        tracing_stackdriver::layer().with_cloud_trace(CloudTraceConfiguration { project_id });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_opentelemetry::layer())
        .with(stackdriver_layer)
        .try_init()?;

    Ok(())
}
