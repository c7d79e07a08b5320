//! Folds per-component reports into one answer for `/health` and `/ready`.
//!
//! Components are queried one at a time, in the order the caller asked for
//! them. The first unavailable component (a `None` report or a code of 500 and
//! above) ends the walk, so components listed after it are never queried and
//! never reported. A provider error aborts the walk with no report at all.
//! Codes from 100 to 400 get a line; other codes below 500 are skipped
//! without one and the walk continues.

use std::fmt;

use tracing::{debug, warn};

use crate::{AggregateError, ComponentRegistry, RequestContext, StatusReport};

/// Which provider capability an aggregation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Status,
    Readiness,
}

impl Capability {
    /// Route segment the capability is served under.
    pub fn route(&self) -> &'static str {
        match self {
            Capability::Status => "health",
            Capability::Readiness => "ready",
        }
    }
}

/// One emitted line of the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Found { name: String, code: u16 },
    NotFound { name: String },
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Found { name, code } => writeln!(f, "Service: {name}: Status: {code}"),
            // no trailing newline, kept for compatibility with existing probes
            Line::NotFound { name } => write!(f, "Service: {name} not found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every requested component was processed without a short-circuit.
    Ok,
    /// `component` reported `code` (or nothing) and stopped the walk.
    Unavailable { component: String, code: Option<u16> },
    /// Nothing was requested.
    BadRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub lines: Vec<Line>,
    pub outcome: Outcome,
}

impl AggregateResult {
    /// HTTP status for this result. Only the outcome decides it.
    pub fn http_code(&self, unavailable_code: u16) -> u16 {
        match self.outcome {
            Outcome::Ok => 200,
            Outcome::Unavailable { .. } => unavailable_code,
            Outcome::BadRequest => 400,
        }
    }

    pub fn render(&self) -> String {
        self.lines.iter().map(ToString::to_string).collect()
    }

    pub fn outcome_label(&self) -> &'static str {
        match self.outcome {
            Outcome::Ok => "ok",
            Outcome::Unavailable { .. } => "unavailable",
            Outcome::BadRequest => "bad_request",
        }
    }
}

/// Queries `names` in order against the `capability` side of `registry`.
pub async fn aggregate(
    registry: &ComponentRegistry,
    capability: Capability,
    names: &[String],
    ctx: Option<&RequestContext>,
) -> Result<AggregateResult, AggregateError> {
    if names.is_empty() {
        return Ok(AggregateResult {
            lines: Vec::new(),
            outcome: Outcome::BadRequest,
        });
    }

    let mut lines = Vec::with_capacity(names.len());

    for name in names {
        let report = match query(registry, capability, name, ctx).await {
            None => {
                lines.push(Line::NotFound { name: name.clone() });
                continue;
            }
            Some(result) => result?,
        };

        match report {
            None => {
                debug!(component = %name, "component reported no status");
                return Ok(AggregateResult {
                    lines,
                    outcome: Outcome::Unavailable {
                        component: name.clone(),
                        code: None,
                    },
                });
            }
            Some(report) if report.is_unavailable() => {
                debug!(component = %name, code = report.code, "component unavailable");
                return Ok(AggregateResult {
                    lines,
                    outcome: Outcome::Unavailable {
                        component: name.clone(),
                        code: Some(report.code),
                    },
                });
            }
            Some(report) if report.is_reported() => lines.push(Line::Found {
                name: name.clone(),
                code: report.code,
            }),
            Some(report) => {
                debug!(component = %name, code = report.code, "code outside reported range, skipped");
            }
        }
    }

    Ok(AggregateResult {
        lines,
        outcome: Outcome::Ok,
    })
}

/// `None` when `name` is not registered for `capability`.
async fn query(
    registry: &ComponentRegistry,
    capability: Capability,
    name: &str,
    ctx: Option<&RequestContext>,
) -> Option<Result<Option<StatusReport>, AggregateError>> {
    let result = match capability {
        Capability::Status => {
            let provider = registry.status(name)?;
            provider
                .status(ctx)
                .await
                .map_err(|source| AggregateError::Provider {
                    name: name.to_string(),
                    source,
                })
        }
        Capability::Readiness => {
            let provider = registry.ready(name)?;
            // Runs to completion even if the request future is dropped.
            match tokio::task::spawn_blocking(move || provider.ready()).await {
                Ok(result) => result.map_err(|source| AggregateError::Provider {
                    name: name.to_string(),
                    source,
                }),
                Err(err) => {
                    warn!(component = %name, error = %err, "readiness task failed");
                    Err(AggregateError::Interrupted {
                        name: name.to_string(),
                    })
                }
            }
        }
    };

    Some(result)
}
