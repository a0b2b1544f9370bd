//! Placeholder substitution.
//!
//! Every placeholder-bearing string in a template (question and resolution
//! prose, endpoints, query-parameter values, extraction rules) goes through
//! the same `Substituter`, so there is exactly one substitution rule:
//!
//! - `{{name}}` is replaced by the binding's value for `name`, everywhere it occurs
//! - `{{name}}` with no binding value is left in the output unchanged, braces included
//! - replacement is a single pass: substituted values are never rescanned
//!
//! Binding keys are escaped before they go into the match pattern, so a key
//! may contain any characters without being read as regex syntax.
//!
//! Strict mode turns an unresolved placeholder into an
//! `UnresolvedPlaceholder` error instead of passing it through.

use crate::binding::BindingContext;
use crate::error::{MarketError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Generic `{{...}}` token, used to find placeholders with no binding value.
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("Invalid token regex"));

/// Substitution engine bound to one binding context.
///
/// Compiles the match pattern once; reuse it for every field of a generation call.
#[derive(Debug)]
pub struct Substituter<'a> {
    binding: &'a BindingContext,
    /// `None` when the binding is empty: nothing can match.
    pattern: Option<Regex>,
    strict: bool,
}

impl<'a> Substituter<'a> {
    /// Compile a substituter for `binding`.
    ///
    /// # Errors
    ///
    /// * `MarketError::UserError` - if the escaped key alternation exceeds the regex size limit
    pub fn new(binding: &'a BindingContext) -> Result<Self> {
        let pattern = if binding.is_empty() {
            None
        } else {
            let alternation = binding
                .keys()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"\{{\{{({})\}}\}}", alternation)).map_err(|e| {
                MarketError::UserError(format!("failed to compile placeholder pattern: {}", e))
            })?;
            Some(pattern)
        };

        Ok(Self {
            binding,
            pattern,
            strict: false,
        })
    }

    /// Fail on unresolved placeholders instead of leaving them in the output.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Substitute `template`, leaving unresolved placeholders untouched.
    pub fn apply(&self, template: &str) -> String {
        self.render(template).0
    }

    /// Substitute one named field, honoring strict mode.
    ///
    /// `field` only labels the error (e.g. `dataSources[0].endpoint`).
    pub fn apply_field(&self, template: &str, field: &str) -> Result<String> {
        let (output, unresolved) = self.render(template);
        match unresolved {
            Some(token) if self.strict => Err(MarketError::UnresolvedPlaceholder {
                token,
                field: field.to_string(),
            }),
            _ => Ok(output),
        }
    }

    /// Returns the substituted text and the first unresolved token, if any.
    ///
    /// Unresolved tokens are searched for only in the literal stretches between
    /// matches, so text coming from substituted values never counts.
    fn render(&self, template: &str) -> (String, Option<String>) {
        let mut output = String::with_capacity(template.len());
        let mut unresolved = None;
        let mut last = 0;

        if let Some(pattern) = &self.pattern {
            for caps in pattern.captures_iter(template) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let literal = &template[last..whole.start()];
                if unresolved.is_none() {
                    unresolved = first_token(literal);
                }
                output.push_str(literal);
                output.push_str(self.binding.get(name.as_str()).unwrap_or(whole.as_str()));
                last = whole.end();
            }
        }

        let tail = &template[last..];
        if unresolved.is_none() {
            unresolved = first_token(tail);
        }
        output.push_str(tail);

        (output, unresolved)
    }
}

fn first_token(text: &str) -> Option<String> {
    TOKEN_REGEX.find(text).map(|m| m.as_str().to_string())
}

/// Substitute `template` against `binding` in lenient mode.
///
/// Convenience for one-off strings; prefer a shared `Substituter` when
/// rendering many fields against the same binding.
pub fn substitute(template: &str, binding: &BindingContext) -> Result<String> {
    Ok(Substituter::new(binding)?.apply(template))
}

/// Names of all `{{name}}` placeholders in `text`, in order of appearance.
pub fn placeholder_names(text: &str) -> Vec<&str> {
    TOKEN_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
