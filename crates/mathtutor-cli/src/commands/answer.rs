//! The `mathtutor answer` command.

use anyhow::Result;

use mathtutor_core::stats::StreakChange;
use mathtutor_core::tutor::SolveOutcome;

use crate::session::{announce_achievements, parse_task_key, Session};
use crate::GlobalArgs;

pub async fn execute(global: &GlobalArgs, task: String, answer: String) -> Result<()> {
    let key = parse_task_key(&task)?;
    let mut session = Session::open(global, true).await?;
    let today = session.today();

    let outcome = session
        .tutor
        .submit_answer(&key, &answer, chrono::Utc::now(), today)?;

    match &outcome.solved {
        Some(solved) => {
            println!("Correct!");
            print_solve(solved, session.tutor.stats().current_streak);
        }
        None => {
            println!("Incorrect. Try again, or run `mathtutor show {key} --solution`.");
        }
    }

    session.close();
    Ok(())
}

/// Summary lines shared by `answer` and `mark understood`.
pub fn print_solve(solved: &SolveOutcome, current_streak: u32) {
    if solved.attempts > 1 {
        println!("Solved {} times.", solved.attempts);
    }
    match solved.streak {
        StreakChange::Extended => println!("Streak extended: {current_streak} days in a row."),
        StreakChange::Restarted => println!("Streak started: day {current_streak}."),
        StreakChange::AlreadyCounted => {}
    }
    announce_achievements(&solved.newly_earned);
}
