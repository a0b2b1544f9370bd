//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for marketgen.
///
/// This struct represents the contents of `marketgen.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Deployment environment (default: production).
    /// Overridden by the `MARKETGEN_ENV` environment variable.
    #[serde(default)]
    pub environment: Environment,

    /// Fail generation when a placeholder has no value (default: false).
    #[serde(default)]
    pub strict_placeholders: bool,

    /// API proxy base URL per environment.
    #[serde(default)]
    pub proxy_prefixes: ProxyPrefixes,

    /// Extra catalog file (YAML list of templates) appended after the builtin templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}
