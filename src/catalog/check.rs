//! Authoring-time consistency check over a catalog.
//!
//! The engine cannot prove that every data source of a template maps the same
//! real-world result to the same outcome index. This pass catches the
//! mechanical half of that invariant (indices out of range, dangling
//! placeholders, malformed result shapes) so catalog edits fail fast in CI
//! instead of producing malformed markets. It never runs inside `generate`.

use super::registry::Catalog;
use super::types::{Template, VariableKind};
use crate::binding::COMPUTED_TOKENS;
use crate::substitute::placeholder_names;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Integer literals a jq rule can hand back as an outcome index.
static OUTCOME_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\bthen|\belse|outcomeIdx:)\s*(\d+)\b").expect("Invalid outcome literal regex")
});

/// One problem found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub template_id: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.template_id, self.message)
    }
}

/// Check every template in the catalog. An empty result means the catalog is consistent.
pub fn check_catalog(catalog: &Catalog) -> Vec<CatalogIssue> {
    catalog.templates().iter().flat_map(check_template).collect()
}

/// Check a single template.
pub fn check_template(template: &Template) -> Vec<CatalogIssue> {
    let mut messages = Vec::new();

    check_defaults(template, &mut messages);
    check_variables(template, &mut messages);
    check_placeholders(template, &mut messages);
    check_data_sources(template, &mut messages);

    messages
        .into_iter()
        .map(|message| CatalogIssue {
            template_id: template.id.clone(),
            message,
        })
        .collect()
}

fn check_defaults(template: &Template, messages: &mut Vec<String>) {
    let defaults = &template.defaults;
    if defaults.outcomes.is_empty() {
        messages.push("declares no outcomes".to_string());
    }

    let mut seen = HashSet::new();
    for outcome in &defaults.outcomes {
        if !seen.insert(outcome.display_order) {
            messages.push(format!(
                "display order {} is used by more than one outcome",
                outcome.display_order
            ));
        }
    }

    if defaults.consensus_threshold_pct == 0 || defaults.consensus_threshold_pct > 100 {
        messages.push(format!(
            "consensus threshold {}% is outside 1..=100",
            defaults.consensus_threshold_pct
        ));
    }
    if defaults.market_cap_pct > 100 {
        messages.push(format!(
            "market cap {}% exceeds 100",
            defaults.market_cap_pct
        ));
    }
}

fn check_variables(template: &Template, messages: &mut Vec<String>) {
    for (name, spec) in &template.variables {
        if spec.kind != VariableKind::Select {
            continue;
        }
        if spec.options.is_empty() {
            messages.push(format!("select variable '{}' has no options", name));
            continue;
        }
        if let Some(default) = spec.default.as_ref().and_then(|v| v.as_str()) {
            if !spec.options.iter().any(|o| o.value == default) {
                messages.push(format!(
                    "default '{}' of select variable '{}' is not one of its options",
                    default, name
                ));
            }
        }
    }
}

fn check_placeholders(template: &Template, messages: &mut Vec<String>) {
    let known: HashSet<&str> = template
        .variables
        .keys()
        .map(String::as_str)
        .chain(COMPUTED_TOKENS.iter().copied())
        .collect();

    let mut fields: Vec<(String, &str)> = vec![
        ("question".to_string(), template.question.as_str()),
        (
            "resolutionDefinition".to_string(),
            template.resolution_definition.as_str(),
        ),
    ];
    for (i, source) in template.data_sources.iter().enumerate() {
        fields.push((format!("dataSources[{}].endpoint", i), &source.endpoint));
        if let Some(params) = &source.query_params {
            for (key, value) in params {
                fields.push((format!("dataSources[{}].queryParams.{}", i, key), value));
            }
        }
        fields.push((
            format!("dataSources[{}].extractionRule", i),
            &source.extraction_rule,
        ));
    }

    for (field, text) in fields {
        for name in placeholder_names(text) {
            if !known.contains(name) {
                messages.push(format!(
                    "{} references unknown placeholder '{{{{{}}}}}'",
                    field, name
                ));
            }
        }
    }
}

fn check_data_sources(template: &Template, messages: &mut Vec<String>) {
    if template.data_sources.is_empty() {
        messages.push("declares no data sources".to_string());
    }

    let outcome_count = template.defaults.outcomes.len();
    for (i, source) in template.data_sources.iter().enumerate() {
        if !source.result_shape.is_outcome_index() {
            messages.push(format!(
                "dataSources[{}] result shape is not a single unsigned outcomeIdx field",
                i
            ));
        }

        for caps in OUTCOME_LITERAL_REGEX.captures_iter(&source.extraction_rule) {
            let Ok(index) = caps[1].parse::<usize>() else {
                continue;
            };
            if index >= outcome_count {
                messages.push(format!(
                    "dataSources[{}] extraction rule can emit outcome index {} but only {} outcomes are declared",
                    i, index, outcome_count
                ));
            }
        }
    }
}
