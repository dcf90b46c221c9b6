//! Utility modules for dotnet-helper

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
