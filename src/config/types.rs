//! Configuration types and defaults for marketgen.
//!
//! This module defines the deployment environment enum, the proxy prefix
//! table, and the default value functions used by the Config struct.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured deployment environment.
pub const ENV_VAR: &str = "MARKETGEN_ENV";

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "marketgen.yaml";

/// Deployment environment; selects the API proxy prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Local proxy on the developer machine.
    Development,
    Staging,
    #[default]
    Production,
}

impl Environment {
    /// Parse an environment name, accepting the common short forms.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Some(Self::Development),
            "staging" | "stage" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Base URL of the API proxy for each environment.
///
/// Every data-source endpoint starts with `{{apiProxyPrefix}}`, which resolves
/// to the entry for the active environment. No trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyPrefixes {
    #[serde(default = "default_development_prefix")]
    pub development: String,
    #[serde(default = "default_staging_prefix")]
    pub staging: String,
    #[serde(default = "default_production_prefix")]
    pub production: String,
}

impl ProxyPrefixes {
    pub fn for_environment(&self, environment: Environment) -> &str {
        match environment {
            Environment::Development => &self.development,
            Environment::Staging => &self.staging,
            Environment::Production => &self.production,
        }
    }

    /// Iterate `(environment, prefix)` pairs.
    pub fn entries(&self) -> [(Environment, &str); 3] {
        [
            (Environment::Development, self.development.as_str()),
            (Environment::Staging, self.staging.as_str()),
            (Environment::Production, self.production.as_str()),
        ]
    }
}

impl Default for ProxyPrefixes {
    fn default() -> Self {
        Self {
            development: default_development_prefix(),
            staging: default_staging_prefix(),
            production: default_production_prefix(),
        }
    }
}

pub fn default_development_prefix() -> String {
    "http://localhost:8787".to_string()
}

pub fn default_staging_prefix() -> String {
    "https://proxy.staging.marketgen.example".to_string()
}

pub fn default_production_prefix() -> String {
    "https://proxy.marketgen.example".to_string()
}
