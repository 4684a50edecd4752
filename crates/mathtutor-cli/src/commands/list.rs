//! The `mathtutor list` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use mathtutor_core::model::{strip_markup, TaskKey};

use crate::session::Session;
use crate::GlobalArgs;

const PREVIEW_CHARS: usize = 60;

pub async fn execute(
    global: &GlobalArgs,
    category: Option<String>,
    subcategory: Option<String>,
) -> Result<()> {
    let session = Session::open(global, true).await?;
    let tutor = &session.tutor;
    let catalog = tutor.catalog()?;
    let completion = tutor.catalog_progress()?;

    match (category, subcategory) {
        (None, _) => {
            let mut table = Table::new();
            table.set_header(vec!["Category", "Name", "Subcategories", "Solved", "Progress"]);
            for (category, row) in catalog.categories.iter().zip(&completion.categories) {
                table.add_row(vec![
                    Cell::new(&category.category_id),
                    Cell::new(&category.category_name),
                    Cell::new(category.subcategories.len()),
                    Cell::new(format!("{}/{}", row.solved, row.total)),
                    Cell::new(format!("{:.0}%", row.percent())),
                ]);
            }
            println!("{table}");
        }
        (Some(category_id), None) => {
            let category = catalog
                .find_category(&category_id)
                .with_context(|| format!("category not found: {category_id}"))?;
            println!("{}", category.category_name);
            if !category.description.is_empty() {
                println!("{}", category.description);
            }
            let rows = completion
                .category(&category_id)
                .map(|c| c.subcategories.as_slice())
                .unwrap_or_default();

            let mut table = Table::new();
            table.set_header(vec!["Subcategory", "Name", "Solved", "Progress"]);
            for sub in rows {
                table.add_row(vec![
                    Cell::new(&sub.subcategory_id),
                    Cell::new(&sub.subcategory_name),
                    Cell::new(format!("{}/{}", sub.solved, sub.total)),
                    Cell::new(format!("{:.0}%", sub.percent())),
                ]);
            }
            println!("{table}");
        }
        (Some(category_id), Some(subcategory_id)) => {
            let sub = catalog
                .find_subcategory(&category_id, &subcategory_id)
                .with_context(|| {
                    format!("subcategory not found: {category_id}/{subcategory_id}")
                })?;
            println!("{}", sub.subcategory_name);

            let progress = tutor.progress();
            let mut table = Table::new();
            table.set_header(vec!["Task", "Difficulty", "Status", "Problem"]);
            for task in sub.offered_tasks() {
                let key = TaskKey::new(&category_id, &subcategory_id, &task.id);
                let status = if progress.is_solved(&key) {
                    "solved".to_string()
                } else {
                    progress
                        .status_of(&key)
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string())
                };
                table.add_row(vec![
                    Cell::new(key.to_string()),
                    Cell::new(task.effective_difficulty()),
                    Cell::new(status),
                    Cell::new(preview(&task.problem_text)),
                ]);
            }
            println!("{table}");
        }
    }

    session.close();
    Ok(())
}

fn preview(problem: &str) -> String {
    let text = strip_markup(problem);
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        text
    }
}
