//! The `mathtutor stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mathtutor_core::achievements::ACHIEVEMENTS;

use crate::session::Session;
use crate::GlobalArgs;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global, false).await?;
    let stats = session.tutor.stats();

    println!("Tasks solved:   {}", stats.total_solved);
    println!("Current streak: {} day(s)", stats.current_streak);
    println!("Best streak:    {} day(s)", stats.max_streak);
    match stats.last_activity_date {
        Some(date) => println!("Last activity:  {}", date.format("%Y-%m-%d")),
        None => println!("Last activity:  never"),
    }

    let earned = ACHIEVEMENTS
        .iter()
        .filter(|a| stats.achievements.contains(a.id))
        .count();
    println!("\nAchievements ({earned}/{}):", ACHIEVEMENTS.len());

    let mut table = Table::new();
    table.set_header(vec!["", "Achievement", "Description", "Earned"]);
    for a in ACHIEVEMENTS {
        let done = stats.achievements.contains(a.id);
        table.add_row(vec![
            Cell::new(a.icon),
            Cell::new(a.name),
            Cell::new(a.description),
            Cell::new(if done { "yes" } else { "-" }),
        ]);
    }
    println!("{table}");

    session.close();
    Ok(())
}
