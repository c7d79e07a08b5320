use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Installs the global Prometheus recorder. `None` if one is already set.
pub fn init_metrics() -> Option<PrometheusHandle> {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    match metrics::set_global_recorder(recorder) {
        Ok(()) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "metrics recorder already installed");
            None
        }
    }
}

pub fn record_aggregation(endpoint: &'static str, outcome: &'static str, elapsed: Option<Duration>) {
    metrics::counter!("vigil_aggregations_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
    if let Some(elapsed) = elapsed {
        metrics::histogram!("vigil_aggregation_duration_seconds", "endpoint" => endpoint)
            .record(elapsed.as_secs_f64());
    }
}
