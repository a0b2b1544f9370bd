//! Tests for config functionality.

use crate::config::types::{
    default_development_prefix, default_production_prefix, default_staging_prefix,
};
use crate::config::{Config, ENV_VAR, Environment};
use crate::error::MarketError;
use serial_test::serial;
use std::io::Write;

struct EnvGuard {
    previous: Option<String>,
}

impl EnvGuard {
    fn set(value: &str) -> Self {
        let previous = std::env::var(ENV_VAR).ok();
        // SAFETY: tests touching the process environment are #[serial].
        unsafe { std::env::set_var(ENV_VAR, value) };
        Self { previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: see EnvGuard::set.
        unsafe {
            match &self.previous {
                Some(v) => std::env::set_var(ENV_VAR, v),
                None => std::env::remove_var(ENV_VAR),
            }
        }
    }
}

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.environment, Environment::Production);
    assert!(!config.strict_placeholders);
    assert_eq!(config.proxy_prefixes.development, default_development_prefix());
    assert_eq!(config.proxy_prefixes.staging, default_staging_prefix());
    assert_eq!(config.proxy_prefixes.production, default_production_prefix());
    assert!(config.catalog_path.is_none());
    assert_eq!(config.api_proxy_prefix(), default_production_prefix());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
environment: staging
proxy_prefixes:
  staging: https://proxy.internal.test
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.environment, Environment::Staging);
    assert_eq!(config.api_proxy_prefix(), "https://proxy.internal.test");
    // Unspecified prefixes keep their defaults
    assert_eq!(config.proxy_prefixes.production, default_production_prefix());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
environment: development
strict_placeholders: true
proxy_prefixes:
  development: http://127.0.0.1:3000
  staging: https://staging.test
  production: https://prod.test
catalog_path: extra-templates.yaml
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert!(config.strict_placeholders);
    assert_eq!(config.api_proxy_prefix(), "http://127.0.0.1:3000");
    assert_eq!(
        config.catalog_path.as_deref(),
        Some(std::path::Path::new("extra-templates.yaml"))
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("future_option: 42\nstrict_placeholders: true").unwrap();
    assert!(config.strict_placeholders);
}

#[test]
fn test_invalid_environment_is_rejected() {
    let err = Config::from_yaml("environment: moon").unwrap_err();
    assert!(matches!(err, MarketError::UserError(_)));
}

#[test]
fn test_validation_rejects_non_http_prefix() {
    let err = Config::from_yaml("proxy_prefixes:\n  production: ftp://proxy.test").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("proxy_prefixes.production"), "{}", msg);
    assert!(msg.contains("http(s) URL"), "{}", msg);
}

#[test]
fn test_validation_rejects_trailing_slash() {
    let err = Config::from_yaml("proxy_prefixes:\n  staging: https://proxy.test/").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("must not end with '/'"), "{}", msg);
    assert!(msg.contains("'https://proxy.test'"), "{}", msg);
}

#[test]
fn test_yaml_roundtrip_preserves_settings() {
    let mut config = Config::default();
    config.environment = Environment::Staging;
    config.strict_placeholders = true;

    let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_environment_from_str() {
    assert_eq!(Environment::from_str("dev"), Some(Environment::Development));
    assert_eq!(Environment::from_str("Staging"), Some(Environment::Staging));
    assert_eq!(Environment::from_str(" prod "), Some(Environment::Production));
    assert_eq!(Environment::from_str("qa"), None);
}

#[test]
fn test_environment_override() {
    let mut config = Config::default();
    config.apply_environment_override(None).unwrap();
    assert_eq!(config.environment, Environment::Production);

    config.apply_environment_override(Some("")).unwrap();
    assert_eq!(config.environment, Environment::Production);

    config.apply_environment_override(Some("development")).unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.api_proxy_prefix(), default_development_prefix());

    let err = config.apply_environment_override(Some("moon")).unwrap_err();
    assert!(err.to_string().contains("invalid environment 'moon'"));
}

#[test]
fn test_load_from_file() {
    let file = write_temp("environment: staging\n");
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.environment, Environment::Staging);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
#[serial]
fn test_discover_applies_env_override() {
    let file = write_temp("environment: production\n");
    let _guard = EnvGuard::set("staging");

    let config = Config::discover(Some(file.path())).unwrap();
    assert_eq!(config.environment, Environment::Staging);
}

#[test]
#[serial]
fn test_discover_rejects_bad_env_override() {
    let file = write_temp("");
    let _guard = EnvGuard::set("nowhere");

    let err = Config::discover(Some(file.path())).unwrap_err();
    assert!(matches!(err, MarketError::UserError(_)));
}

#[test]
fn test_build_catalog_merges_extra_file() {
    let catalog_file = write_temp(
        r#"
- id: custom-yes-no
  name: Custom
  question: "Is it {{thing}}?"
  resolutionDefinition: "Yes if {{thing}}."
  variables:
    thing:
      type: text
      required: true
  dataSources:
    - name: example
      endpoint: "{{apiProxyPrefix}}/example"
      extractionRule: "{outcomeIdx: 0}"
  defaults:
    outcomes:
      - name: "Yes"
        displayOrder: 0
      - name: "No"
        displayOrder: 1
    consensusThresholdPct: 100
    collateralToken: USDT0
    marketCapPct: 5
"#,
    );
    let mut config = Config::default();
    config.catalog_path = Some(catalog_file.path().to_path_buf());

    let catalog = config.build_catalog().unwrap();
    let builtin_len = crate::catalog::Catalog::builtin().len();
    assert_eq!(catalog.len(), builtin_len + 1);
    assert_eq!(catalog.templates().last().unwrap().id, "custom-yes-no");
}
