//! Variable binding.
//!
//! Turns one attestation instant plus the caller's variables into the flat
//! token→string map that the substitution engine renders against. Binding is
//! a pure function of its inputs: a `BindingContext` lives for exactly one
//! generation call.
//!
//! # Tokens
//!
//! Declared template variables pass through as strings, falling back to the
//! variable's default. On top of those the following are computed:
//!
//! - `priceFormatted` / `goalFormatted` - grouped decimals (absent when the input is absent)
//! - `comparisonType` - caller value or `"above"`
//! - `comparisonOp` - `"<"` for `"below"`, `">="` for anything else
//! - `attestationTime` - `Feb 20, 2025 12:00` (UTC)
//! - `attestationTimeUnix` / `attestationTimeUnixMs` - epoch seconds, and exactly 1000x that
//! - `attestationWindowStartUnix` - epoch seconds one hour before the attestation time
//! - `attestationTimeDate` - `2025-02-20` (UTC)
//! - `attestationTimeFormatted` - `2025-02-20 20:00:00` (Asia/Shanghai)
//! - `matchDateFormatted` - `February 20, 2025 12:00:00` (UTC)
//! - `apiProxyPrefix` - caller value or the configured deployment prefix

pub mod format;


use crate::catalog::VariableSpec;
use crate::error::Result;
use format::{
    DEFAULT_MAX_FRACTION_DIGITS, display_time, format_grouped, long_time, numeric_value,
    parse_attestation_time, shanghai_time, utc_date, value_to_string,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Caller-supplied variables, loosely typed.
pub type Variables = Map<String, Value>;

pub const ATTESTATION_TIME: &str = "attestationTime";
pub const ATTESTATION_TIME_UNIX: &str = "attestationTimeUnix";
pub const ATTESTATION_TIME_UNIX_MS: &str = "attestationTimeUnixMs";
pub const ATTESTATION_WINDOW_START_UNIX: &str = "attestationWindowStartUnix";
pub const ATTESTATION_TIME_DATE: &str = "attestationTimeDate";
pub const ATTESTATION_TIME_FORMATTED: &str = "attestationTimeFormatted";
pub const MATCH_DATE_FORMATTED: &str = "matchDateFormatted";
pub const COMPARISON_TYPE: &str = "comparisonType";
pub const COMPARISON_OP: &str = "comparisonOp";
pub const PRICE_FORMATTED: &str = "priceFormatted";
pub const GOAL_FORMATTED: &str = "goalFormatted";
pub const API_PROXY_PREFIX: &str = "apiProxyPrefix";

/// Tokens the binder can produce without a matching variable declaration.
pub const COMPUTED_TOKENS: &[&str] = &[
    ATTESTATION_TIME,
    ATTESTATION_TIME_UNIX,
    ATTESTATION_TIME_UNIX_MS,
    ATTESTATION_WINDOW_START_UNIX,
    ATTESTATION_TIME_DATE,
    ATTESTATION_TIME_FORMATTED,
    MATCH_DATE_FORMATTED,
    COMPARISON_TYPE,
    COMPARISON_OP,
    PRICE_FORMATTED,
    GOAL_FORMATTED,
    API_PROXY_PREFIX,
];

const DEFAULT_COMPARISON: &str = "above";

/// Length of the price window that ends at the attestation time.
pub const PRICE_WINDOW_SECS: i64 = 3600;

/// Number inputs with a grouped display token.
const FORMATTED_NUMBERS: &[(&str, &str)] = &[("price", PRICE_FORMATTED), ("goal", GOAL_FORMATTED)];

/// Resolved token→value mapping for one generation call.
///
/// Ordered so that anything derived from it (patterns, debug output) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingContext {
    values: BTreeMap<String, String>,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BindingContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Map a comparison direction to the operator used in extraction rules.
///
/// Only `"below"` is strict; every other value, including unknown ones, is `>=`.
pub fn comparison_operator(comparison_type: &str) -> &'static str {
    if comparison_type == "below" { "<" } else { ">=" }
}

/// Build the binding context for one generation call.
///
/// # Arguments
///
/// * `schema` - the template's variable schema
/// * `variables` - caller values; `attestationTime` is required
/// * `api_proxy_prefix` - deployment proxy prefix, used unless the caller supplies one
///
/// # Errors
///
/// * `MarketError::InvalidAttestationTime` - `attestationTime` missing or unparsable
pub fn bind(
    schema: &BTreeMap<String, VariableSpec>,
    variables: &Variables,
    api_proxy_prefix: &str,
) -> Result<BindingContext> {
    let instant = parse_attestation_time(variables.get(ATTESTATION_TIME))?;
    let mut binding = BindingContext::new();

    for (name, spec) in schema {
        let value = variables
            .get(name)
            .filter(|v| !v.is_null())
            .or(spec.default.as_ref())
            .and_then(value_to_string);
        if let Some(value) = value {
            binding.insert(name.as_str(), value);
        }
    }

    let proxy = variables
        .get(API_PROXY_PREFIX)
        .and_then(Value::as_str)
        .unwrap_or(api_proxy_prefix);
    binding.insert(API_PROXY_PREFIX, proxy);

    for (input, token) in FORMATTED_NUMBERS {
        let max_digits = schema
            .get(*input)
            .and_then(|spec| spec.decimals)
            .unwrap_or(DEFAULT_MAX_FRACTION_DIGITS);
        let value = variables
            .get(*input)
            .filter(|v| !v.is_null())
            .or_else(|| schema.get(*input).and_then(|spec| spec.default.as_ref()))
            .and_then(numeric_value);
        if let Some(value) = value {
            binding.insert(*token, format_grouped(value, max_digits));
        }
    }

    let comparison = variables
        .get(COMPARISON_TYPE)
        .and_then(value_to_string)
        .unwrap_or_else(|| DEFAULT_COMPARISON.to_string());
    binding.insert(COMPARISON_OP, comparison_operator(&comparison));
    binding.insert(COMPARISON_TYPE, comparison);

    let unix = instant.timestamp();
    binding.insert(ATTESTATION_TIME, display_time(&instant));
    binding.insert(ATTESTATION_TIME_UNIX, unix.to_string());
    binding.insert(ATTESTATION_TIME_UNIX_MS, (unix * 1000).to_string());
    binding.insert(
        ATTESTATION_WINDOW_START_UNIX,
        (unix - PRICE_WINDOW_SECS).to_string(),
    );
    binding.insert(ATTESTATION_TIME_DATE, utc_date(&instant));
    binding.insert(ATTESTATION_TIME_FORMATTED, shanghai_time(&instant));
    binding.insert(MATCH_DATE_FORMATTED, long_time(&instant));

    debug!(tokens = binding.len(), %instant, "binding context built");
    Ok(binding)
}
