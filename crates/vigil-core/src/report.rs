use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reports with a code in `MIN_CODE..=MAX_REPORTED_CODE` get a line in the text report.
pub const MIN_CODE: u16 = 100;
pub const MAX_REPORTED_CODE: u16 = 400;
/// Codes at or above this value mean the component cannot serve.
pub const UNAVAILABLE_FLOOR: u16 = 500;

/// A single status sample produced by a provider. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusReport {
    pub code: u16,
    /// Opaque provider-specific details.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl StatusReport {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            metadata: BTreeMap::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn unavailable() -> Self {
        Self::new(503)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn get_metadata(&self, key: &str) -> Option<&String> {
        self.metadata.get(key)
    }

    pub fn is_unavailable(&self) -> bool {
        self.code >= UNAVAILABLE_FLOOR
    }

    /// Whether the code belongs in the text report. Codes outside the range
    /// that are not unavailable are skipped without a line.
    pub fn is_reported(&self) -> bool {
        (MIN_CODE..=MAX_REPORTED_CODE).contains(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_hundreds_are_unavailable() {
        assert!(StatusReport::new(500).is_unavailable());
        assert!(StatusReport::new(599).is_unavailable());
        assert!(!StatusReport::new(499).is_unavailable());
        assert!(!StatusReport::ok().is_unavailable());
    }

    #[test]
    fn only_100_to_400_is_reported() {
        assert!(StatusReport::new(100).is_reported());
        assert!(StatusReport::new(400).is_reported());
        assert!(!StatusReport::new(99).is_reported());
        assert!(!StatusReport::new(0).is_reported());
        assert!(!StatusReport::new(401).is_reported());
        assert!(!StatusReport::new(499).is_reported());
    }

    #[test]
    fn empty_metadata_is_omitted_from_json() {
        let json = serde_json::to_string(&StatusReport::ok()).unwrap();
        assert_eq!(json, r#"{"code":200}"#);

        let report = StatusReport::unavailable().with_metadata("reason", "draining");
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"code":503,"metadata":{"reason":"draining"}}"#);
    }
}
