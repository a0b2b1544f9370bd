//! Implementation of the `marketgen generate` command.
//!
//! Collects variables from the command line, runs the generator and prints
//! the market as pretty JSON on stdout.

use super::CommandContext;
use crate::binding::Variables;
use crate::cli::GenerateArgs;
use crate::error::{MarketError, Result};
use crate::generate::{GeneratedMarket, Generator, GeneratorOptions};
use serde_json::Value;
use tracing::debug;

/// Execute the `marketgen generate` command.
pub fn cmd_generate(ctx: &CommandContext, args: GenerateArgs) -> Result<()> {
    let market = generate_market(ctx, &args)?;
    let json = serde_json::to_string_pretty(&market)
        .map_err(|e| MarketError::UserError(format!("failed to serialize market: {}", e)))?;
    println!("{}", json);
    Ok(())
}

pub(super) fn generate_market(ctx: &CommandContext, args: &GenerateArgs) -> Result<GeneratedMarket> {
    let variables = collect_variables(args)?;

    let mut options = GeneratorOptions::from_config(&ctx.config);
    options.strict_placeholders |= args.strict;

    Generator::new(&ctx.catalog, options).generate(&args.template_id, &variables)
}

/// Merge variables from `--vars-file`, `--vars-json` and `--var`, in that
/// order. A key given by a later source replaces the earlier value.
pub(super) fn collect_variables(args: &GenerateArgs) -> Result<Variables> {
    let mut variables = Variables::new();

    if let Some(path) = &args.vars_file {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MarketError::UserError(format!(
                "failed to read variables file '{}': {}",
                path.display(),
                e
            ))
        })?;
        variables.extend(parse_object(&content, "--vars-file")?);
    }

    if let Some(json) = &args.vars_json {
        variables.extend(parse_object(json, "--vars-json")?);
    }

    for raw in &args.vars {
        let (key, value) = parse_var(raw)?;
        variables.insert(key, value);
    }

    debug!(count = variables.len(), "collected variables");
    Ok(variables)
}

/// Parse `KEY=VALUE`. The value is split at the first `=`, so it may contain
/// more. Values that parse as JSON numbers or booleans keep that type, but
/// only when the parsed value prints back as the same text; anything else
/// (ids wider than u64, `1.10`, `1e3`) stays a string.
pub(super) fn parse_var(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        MarketError::UserError(format!(
            "invalid --var '{}': expected KEY=VALUE",
            raw
        ))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(MarketError::UserError(format!(
            "invalid --var '{}': key is empty",
            raw
        )));
    }

    let value = match serde_json::from_str::<Value>(value) {
        Ok(parsed @ (Value::Number(_) | Value::Bool(_))) if parsed.to_string() == value => parsed,
        _ => Value::String(value.to_string()),
    };

    Ok((key.to_string(), value))
}

fn parse_object(text: &str, source: &str) -> Result<Variables> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(MarketError::UserError(format!(
            "{} must contain a JSON object, found {}",
            source,
            json_type_name(&other)
        ))),
        Err(e) => Err(MarketError::UserError(format!(
            "{} is not valid JSON: {}",
            source, e
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
