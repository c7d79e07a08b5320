pub mod app;
pub mod bootstrap;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod rpc;
pub mod telemetry;

pub use app::{AppState, router};
pub use config::{ConfigError, StatusConfig};
pub use error::{ApiError, ServeError};
