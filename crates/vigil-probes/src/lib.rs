//! Components bundled with the server binary.
//!
//! Each probe is an ordinary provider: the host constructs it and registers
//! whichever capabilities it implements.

mod error;
mod gate;
mod sqlite;
mod tcp;

pub use error::ProbeError;
pub use gate::ShutdownGate;
pub use sqlite::SqliteProbe;
pub use tcp::{TcpProbe, parse_tcp_probes};
