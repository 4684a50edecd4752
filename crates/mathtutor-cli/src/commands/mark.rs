//! The `mathtutor mark` command.

use anyhow::Result;
use chrono::Utc;

use mathtutor_core::progress::TaskStatus;

use crate::commands::answer::print_solve;
use crate::session::{parse_task_key, Session};
use crate::{GlobalArgs, MarkKind};

pub async fn execute(global: &GlobalArgs, task: String, kind: MarkKind) -> Result<()> {
    let key = parse_task_key(&task)?;
    let mut session = Session::open(global, true).await?;
    let today = session.today();

    match kind {
        MarkKind::Understood => {
            let solved = session.tutor.mark_understood(&key, Utc::now(), today)?;
            println!("Marked {key} as understood.");
            print_solve(&solved, session.tutor.stats().current_streak);
        }
        MarkKind::NeedsPractice => {
            session
                .tutor
                .mark_status(&key, TaskStatus::NeedsPractice, Utc::now())?;
            println!("Marked {key} for extra practice.");
        }
        MarkKind::Difficult => {
            session.tutor.mark_status(&key, TaskStatus::Difficult, Utc::now())?;
            println!("Marked {key} as difficult. Consider reviewing the topic material.");
        }
    }

    session.close();
    Ok(())
}
