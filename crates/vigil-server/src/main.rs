use std::sync::Arc;

use tracing::{error, info, warn};
use vigil_core::{ComponentRegistry, StatusService};
use vigil_probes::ShutdownGate;
use vigil_server::{
    AppState, ConfigError, ServeError, StatusConfig, bootstrap, router, telemetry,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    if let Err(e) = run().await {
        match e {
            ServeError::Config(ConfigError::Disabled) => warn!("{}", e),
            _ => error!("{}", e),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServeError> {
    let config = StatusConfig::from_env()?;
    let metrics = telemetry::init_metrics();

    let registry = Arc::new(ComponentRegistry::new());
    let gate = bootstrap::register_components(&registry, &config)?;

    let state = AppState::new(
        StatusService::new(registry),
        config.unavailable_status_code,
    );
    let app = router(state, metrics, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(|source| ServeError::Bind {
            address: config.address.clone(),
            source,
        })?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(gate))
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal(gate: Arc<ShutdownGate>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
    gate.begin_shutdown();
}
