pub mod report;
pub mod context;
pub mod provider;
pub mod registry;
pub mod aggregate;
pub mod service;
pub mod errors;

pub use report::StatusReport;
pub use context::RequestContext;
pub use provider::{Named, ReadinessProvider, StatusProvider};
pub use registry::{ComponentRegistry, RegistryError};
pub use aggregate::{AggregateResult, Capability, Line, Outcome, aggregate};
pub use service::{LookupError, StatusService};
pub use errors::{AggregateError, ProviderError};
