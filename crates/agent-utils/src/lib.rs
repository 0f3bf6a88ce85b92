//! Shared utilities
//!
//! Logging setup and environment-driven configuration helpers used across
//! the workspace.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_flag, env_list, env_parse};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
