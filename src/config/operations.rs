//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{DEFAULT_CONFIG_FILE, ENV_VAR, Environment};
use crate::catalog::Catalog;
use crate::error::{MarketError, Result};
use std::path::Path;
use tracing::{debug, info};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(MarketError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MarketError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "loading config");
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| MarketError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            MarketError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Find and load the effective config.
    ///
    /// An explicit path must exist. Without one, `marketgen.yaml` in the
    /// working directory is used if present, otherwise defaults. The
    /// `MARKETGEN_ENV` override is applied last.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        let from_env = std::env::var(ENV_VAR).ok();
        config.apply_environment_override(from_env.as_deref())?;
        Ok(config)
    }

    /// Replace the environment with `value` when one is given.
    pub fn apply_environment_override(&mut self, value: Option<&str>) -> Result<()> {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return Ok(());
        };
        self.environment = Environment::from_str(value).ok_or_else(|| {
            MarketError::UserError(format!(
                "invalid environment '{}': expected development, staging or production",
                value
            ))
        })?;
        Ok(())
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - every proxy prefix is an absolute `http://` or `https://` URL
    /// - no proxy prefix ends with `/` (endpoints add their own)
    pub fn validate(&self) -> Result<()> {
        for (environment, prefix) in self.proxy_prefixes.entries() {
            if !(prefix.starts_with("http://") || prefix.starts_with("https://")) {
                return Err(MarketError::UserError(format!(
                    "config validation failed: proxy_prefixes.{} must be an http(s) URL (found '{}')",
                    environment.as_str(),
                    prefix
                )));
            }
            if prefix.ends_with('/') {
                return Err(MarketError::UserError(format!(
                    "config validation failed: proxy_prefixes.{} must not end with '/'. Use '{}' instead.",
                    environment.as_str(),
                    prefix.trim_end_matches('/')
                )));
            }
        }

        Ok(())
    }

    /// Proxy prefix for the active environment.
    pub fn api_proxy_prefix(&self) -> &str {
        self.proxy_prefixes.for_environment(self.environment)
    }

    /// The builtin catalog, merged with `catalog_path` when configured.
    pub fn build_catalog(&self) -> Result<Catalog> {
        let builtin = Catalog::builtin();
        let catalog = match &self.catalog_path {
            Some(path) => builtin.merged(Catalog::load(path)?)?,
            None => builtin,
        };
        info!(
            templates = catalog.len(),
            environment = self.environment.as_str(),
            "catalog ready"
        );
        Ok(catalog)
    }
}
