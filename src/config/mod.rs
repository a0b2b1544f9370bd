//! Configuration model for marketgen.
//!
//! This module defines the Config struct that represents `marketgen.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, validation of config values, and
//! the `MARKETGEN_ENV` environment override.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::{DEFAULT_CONFIG_FILE, ENV_VAR, Environment, ProxyPrefixes};
