//! Telemetry for wordveil.
//!
//! Structured logging through `tracing`; the library only emits events and
//! leaves subscriber installation to the embedding application or the CLI.

mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat, ENV_LOG_FORMAT, ENV_LOG_LEVEL};
