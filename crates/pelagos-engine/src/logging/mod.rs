//! Logging utilities.
//!
//! Centralizes logger initialization. The engine itself only depends on the
//! `log` facade; the `env_logger` backend is wired up here so host binaries
//! get consistent output with one call.

mod init;

pub use init::{LoggingConfig, init_logging};
