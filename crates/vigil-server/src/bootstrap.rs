//! Component wiring performed before the listener starts.

use std::sync::Arc;

use tracing::info;
use vigil_core::ComponentRegistry;
use vigil_probes::{ShutdownGate, SqliteProbe, parse_tcp_probes};

use crate::{ServeError, StatusConfig};

/// Name the server registers itself under.
pub const SELF_COMPONENT: &str = "vigil";

/// Registers the bundled components described by `config` and returns the
/// gate used to flip readiness off on shutdown.
pub fn register_components(
    registry: &ComponentRegistry,
    config: &StatusConfig,
) -> Result<Arc<ShutdownGate>, ServeError> {
    let gate = Arc::new(ShutdownGate::new(SELF_COMPONENT));
    registry.register_status(gate.clone());
    registry.register_ready(gate.clone());

    if let Some(url) = &config.database_url {
        let sqlite = Arc::new(SqliteProbe::open("sqlite", url)?);
        registry.register_status(sqlite.clone());
        registry.register_ready(sqlite);
    }

    for probe in parse_tcp_probes(&config.tcp_probes)? {
        registry.register_status(Arc::new(probe));
    }

    info!(
        status = ?registry.status_names(),
        ready = ?registry.ready_names(),
        "components registered"
    );

    Ok(gate)
}
