//! Implementation of the `marketgen check` command.

use super::CommandContext;
use crate::catalog::check_catalog;
use crate::error::{MarketError, Result};

/// Execute the `marketgen check` command.
///
/// Prints every issue found. Any issue turns into a `CatalogError` so the
/// process exits with the catalog-failure code.
pub fn cmd_check(ctx: &CommandContext) -> Result<()> {
    let issues = check_catalog(&ctx.catalog);

    if issues.is_empty() {
        println!("Catalog OK: {} templates checked.", ctx.catalog.len());
        return Ok(());
    }

    println!("Catalog issues ({}):", issues.len());
    println!();
    for issue in &issues {
        println!("  - {}", issue);
    }

    Err(MarketError::CatalogError(format!(
        "{} issue(s) found in {} templates",
        issues.len(),
        ctx.catalog.len()
    )))
}
