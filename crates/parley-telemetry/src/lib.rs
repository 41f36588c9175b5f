//! Telemetry records and append-only persistence for chat exchanges

mod env;
mod io;
mod paths;
mod store;
mod types;

pub use env::{EnvironmentInfo, HostEnvironment, StaticEnvironment};
pub use io::{append_jsonl, ensure_initialized, escape_field, CSV_HEADER};
pub use paths::Paths;
pub use store::TelemetryStore;
pub use types::TelemetryRecord;
