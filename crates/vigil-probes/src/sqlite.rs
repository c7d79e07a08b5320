use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::Connection;
use vigil_core::{
    Named, ProviderError, ReadinessProvider, RequestContext, StatusProvider, StatusReport,
};

use crate::ProbeError;

/// Reports whether a SQLite database still answers queries.
pub struct SqliteProbe {
    name: String,
    path: String,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProbe {
    pub fn open(name: impl Into<String>, path: &str) -> Result<Self, ProbeError> {
        let conn = Connection::open(path)?;
        Ok(Self {
            name: name.into(),
            path: path.to_string(),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn check(&self) -> StatusReport {
        check(&self.name, &self.path, &self.conn)
    }
}

fn check(name: &str, path: &str, conn: &Mutex<Connection>) -> StatusReport {
    let conn = conn.lock();
    match conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)) {
        Ok(_) => StatusReport::ok().with_metadata("path", path),
        Err(e) => {
            tracing::warn!(probe = %name, error = %e, "sqlite check failed");
            StatusReport::unavailable()
                .with_metadata("path", path)
                .with_metadata("error", e.to_string())
        }
    }
}

impl Named for SqliteProbe {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl StatusProvider for SqliteProbe {
    async fn status(
        &self,
        _ctx: Option<&RequestContext>,
    ) -> Result<Option<StatusReport>, ProviderError> {
        let (name, path, conn) = (self.name.clone(), self.path.clone(), self.conn.clone());
        tokio::task::spawn_blocking(move || check(&name, &path, &conn))
            .await
            .map(Some)
            .map_err(|e| {
                ProviderError::msg(format!("sqlite check for {} did not finish: {e}", self.name))
            })
    }
}

impl ReadinessProvider for SqliteProbe {
    fn ready(&self) -> Result<Option<StatusReport>, ProviderError> {
        Ok(Some(self.check()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok_for_reachable_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.db");
        let probe = SqliteProbe::open("sqlite", path.to_str().unwrap()).unwrap();

        let report = probe.status(None).await.unwrap().unwrap();
        assert_eq!(report.code, 200);
        assert_eq!(
            report.get_metadata("path").map(String::as_str),
            path.to_str()
        );

        let report = probe.ready().unwrap().unwrap();
        assert_eq!(report.code, 200);
    }

    #[tokio::test]
    async fn status_waits_for_a_held_connection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.db");
        let probe = Arc::new(SqliteProbe::open("sqlite", path.to_str().unwrap()).unwrap());

        // another user holds the connection; the check must not stall the runtime
        let guard = probe.conn.lock();
        let pending = tokio::spawn({
            let probe = probe.clone();
            async move { probe.status(None).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!pending.is_finished());
        drop(guard);

        let report = pending.await.unwrap().unwrap().unwrap();
        assert_eq!(report.code, 200);
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("vigil.db");

        let err = SqliteProbe::open("sqlite", path.to_str().unwrap())
            .err()
            .expect("directory does not exist");
        assert!(matches!(err, ProbeError::Sqlite(_)));
    }
}
