//! The `mathtutor show` command.

use anyhow::Result;

use mathtutor_core::model::strip_markup;

use crate::session::{parse_task_key, Session};
use crate::GlobalArgs;

pub async fn execute(global: &GlobalArgs, task: String, solution: bool) -> Result<()> {
    let key = parse_task_key(&task)?;
    let session = Session::open(global, true).await?;
    let tutor = &session.tutor;
    let task = tutor.task(&key)?;
    let catalog = tutor.catalog()?;

    if let (Some(category), Some(sub)) = (
        catalog.find_category(&key.category_id),
        catalog.find_subcategory(&key.category_id, &key.subcategory_id),
    ) {
        println!("{} > {}", category.category_name, sub.subcategory_name);
    }
    println!("Task {key} ({})", task.effective_difficulty());
    println!();
    println!("{}", strip_markup(&task.problem_text));

    let progress = tutor.progress();
    if let Some(record) = progress.solved_record(&key) {
        println!(
            "\nSolved ({}, {} time(s), last on {})",
            record.method,
            record.attempts,
            record.timestamp.format("%Y-%m-%d")
        );
    } else if let Some(status) = progress.status_of(&key) {
        println!("\nMarked: {status}");
    }

    if solution {
        println!("\nSolution:");
        if task.solution_text.is_empty() {
            println!("(no worked solution available)");
        } else {
            println!("{}", strip_markup(&task.solution_text));
        }
        println!("Answer: {}", task.correct_answer);
    }

    session.close();
    Ok(())
}
