//! The `mathtutor progress` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mathtutor_core::report::difficult_topics;

use crate::session::Session;
use crate::GlobalArgs;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global, true).await?;
    let tutor = &session.tutor;
    let completion = tutor.catalog_progress()?;

    println!(
        "Overall: {}/{} tasks ({:.0}%)",
        completion.solved,
        completion.total,
        completion.percent()
    );

    let mut table = Table::new();
    table.set_header(vec!["Category / Subcategory", "Solved", "Total", "Progress"]);
    for category in &completion.categories {
        table.add_row(vec![
            Cell::new(&category.category_name),
            Cell::new(category.solved),
            Cell::new(category.total),
            Cell::new(format!("{:.0}%", category.percent())),
        ]);
        for sub in &category.subcategories {
            table.add_row(vec![
                Cell::new(format!("  {}", sub.subcategory_name)),
                Cell::new(sub.solved),
                Cell::new(sub.total),
                Cell::new(format!("{:.0}%", sub.percent())),
            ]);
        }
    }
    println!("{table}");

    let topics = difficult_topics(tutor.catalog()?, tutor.progress());
    if !topics.is_empty() {
        println!("\nDifficult topics:");
        for topic in &topics {
            println!("  - {topic}");
        }
    }

    session.close();
    Ok(())
}
