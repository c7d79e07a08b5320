use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use vigil_core::{Named, ProviderError, RequestContext, StatusProvider, StatusReport};

use crate::ProbeError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Reports whether a TCP endpoint accepts connections.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    name: String,
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            timeout: CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Named for TcpProbe {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl StatusProvider for TcpProbe {
    async fn status(
        &self,
        _ctx: Option<&RequestContext>,
    ) -> Result<Option<StatusReport>, ProviderError> {
        let report = match tokio::time::timeout(self.timeout, TcpStream::connect(&self.address)).await
        {
            Ok(Ok(_)) => StatusReport::ok(),
            Ok(Err(e)) => StatusReport::unavailable().with_metadata("error", e.to_string()),
            Err(_) => StatusReport::unavailable().with_metadata("error", "connect timed out"),
        };
        Ok(Some(report.with_metadata("address", &self.address)))
    }
}

/// Parses `name=host:port` pairs separated by commas. Blank input yields no probes.
pub fn parse_tcp_probes(list: &str) -> Result<Vec<TcpProbe>, ProbeError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<TcpProbe, ProbeError> {
            let (name, address) = entry
                .split_once('=')
                .map(|(n, a)| (n.trim(), a.trim()))
                .filter(|(n, a)| !n.is_empty() && a.contains(':'))
                .ok_or_else(|| ProbeError::InvalidDefinition(entry.to_string()))?;
            Ok(TcpProbe::new(name, address))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn listening_socket_is_ok() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = TcpProbe::new("upstream", addr.to_string());
        let report = probe.status(None).await.unwrap().unwrap();
        assert_eq!(report.code, 200);
    }

    #[tokio::test]
    async fn closed_port_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = TcpProbe::new("upstream", addr.to_string())
            .with_timeout(Duration::from_millis(500));
        let report = probe.status(None).await.unwrap().unwrap();
        assert_eq!(report.code, 503);
        assert!(report.get_metadata("error").is_some());
    }

    #[test]
    fn parses_probe_list() {
        let probes = parse_tcp_probes(" redis=127.0.0.1:6379, db = localhost:5432 ,").unwrap();
        let parsed: Vec<(&str, &str)> = probes.iter().map(|p| (p.name(), p.address())).collect();
        assert_eq!(parsed, vec![("redis", "127.0.0.1:6379"), ("db", "localhost:5432")]);

        assert!(parse_tcp_probes("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(matches!(
            parse_tcp_probes("redis"),
            Err(ProbeError::InvalidDefinition(_))
        ));
        assert!(matches!(
            parse_tcp_probes("=127.0.0.1:1"),
            Err(ProbeError::InvalidDefinition(_))
        ));
    }
}
