//! Implementation of the `marketgen show` command.
//!
//! Displays the public fields and variable schema of a single template.

use super::CommandContext;
use crate::catalog::{TemplateSummary, VariableSpec};
use crate::cli::ShowArgs;
use crate::error::{MarketError, Result};

const RULE: &str =
    "================================================================================";

/// Execute the `marketgen show` command.
pub fn cmd_show(ctx: &CommandContext, args: ShowArgs) -> Result<()> {
    let template = ctx.catalog.get_template(&args.template_id).ok_or_else(|| {
        MarketError::TemplateNotFound(args.template_id.clone())
    })?;
    let summary = TemplateSummary::from(template);

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| MarketError::UserError(format!("failed to serialize template: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_summary(&summary));
    }

    Ok(())
}

pub(super) fn render_summary(summary: &TemplateSummary) -> String {
    let mut out = String::new();

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{} [{}]\n", summary.id, summary.category));
    out.push_str(RULE);
    out.push_str("\n\n");

    out.push_str(&format!("Name:         {}\n", summary.name));
    if !summary.description.is_empty() {
        out.push_str(&format!("Description:  {}\n", summary.description));
    }
    if !summary.image.is_empty() {
        out.push_str(&format!("Image:        {}\n", summary.image));
    }

    if summary.variables.is_empty() {
        return out;
    }

    out.push_str("\nVariables:\n");
    let width = summary.variables.keys().map(|k| k.len()).max().unwrap_or(0);
    for (name, spec) in &summary.variables {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            name,
            describe_variable(spec),
            width = width
        ));
    }

    out
}

fn describe_variable(spec: &VariableSpec) -> String {
    let mut parts = vec![spec.kind.as_str().to_string()];

    if spec.required {
        parts.push("required".to_string());
    }
    if let Some(entity) = &spec.entity {
        parts.push(format!("entity={}", entity));
    }
    if let Some(decimals) = spec.decimals {
        parts.push(format!("decimals={}", decimals));
    }
    if !spec.options.is_empty() {
        let values: Vec<&str> = spec.options.iter().map(|o| o.value.as_str()).collect();
        parts.push(format!("options={}", values.join("|")));
    }
    if let Some(default) = &spec.default {
        parts.push(format!("default={}", default));
    }

    let mut line = parts.join(", ");
    if let Some(label) = &spec.label {
        line.push_str(&format!("  ({})", label));
    }
    line
}
