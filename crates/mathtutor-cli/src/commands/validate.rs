//! The `mathtutor validate` command.

use anyhow::Result;

use mathtutor_core::catalog::{validate_catalog, Severity};

use crate::session::{load_catalog, resolve_config};
use crate::GlobalArgs;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = resolve_config(global)?;
    let catalog = load_catalog(&config).await?;

    let subcategories: usize = catalog.categories.iter().map(|c| c.subcategories.len()).sum();
    println!(
        "Catalog: {} ({} categories, {} subcategories, {} offered tasks)",
        config.catalog,
        catalog.categories.len(),
        subcategories,
        catalog.total_offered_tasks()
    );

    let warnings: Vec<_> = validate_catalog(&catalog)
        .into_iter()
        .filter(|i| i.severity == Severity::Warning)
        .collect();
    for w in &warnings {
        println!("  WARNING: {w}");
    }

    if warnings.is_empty() {
        println!("Catalog is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
