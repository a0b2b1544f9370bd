//! Implementation of the `marketgen list` command.

use super::CommandContext;
use crate::catalog::TemplateSummary;
use crate::cli::ListArgs;
use crate::error::{MarketError, Result};

/// Execute the `marketgen list` command.
pub fn cmd_list(ctx: &CommandContext, args: ListArgs) -> Result<()> {
    let summaries = ctx.catalog.list_templates();

    if args.json {
        let json = serde_json::to_string_pretty(&summaries)
            .map_err(|e| MarketError::UserError(format!("failed to serialize templates: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_list(&summaries));
    }

    Ok(())
}

/// Render summaries as an aligned `id  category  name` table.
pub(super) fn render_list(summaries: &[TemplateSummary]) -> String {
    if summaries.is_empty() {
        return "No templates.\n".to_string();
    }

    let id_width = summaries.iter().map(|s| s.id.len()).max().unwrap_or(0);
    let category_width = summaries.iter().map(|s| s.category.len()).max().unwrap_or(0);

    let mut out = format!("Templates ({}):\n\n", summaries.len());
    for summary in summaries {
        out.push_str(&format!(
            "  {:<id_width$}  {:<category_width$}  {}\n",
            summary.id,
            summary.category,
            summary.name,
            id_width = id_width,
            category_width = category_width,
        ));
    }
    out
}
