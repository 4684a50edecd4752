//! The composed tutoring session.
//!
//! `Tutor` owns the catalog, the progress log and the user stats for one
//! session and applies every user action to all three in a fixed order:
//! progress, streak, total, achievements, persist.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, instrument, warn};

use crate::achievements::{self, Achievement, AchievementContext};
use crate::error::TutorError;
use crate::model::{Catalog, Task, TaskKey};
use crate::progress::{Progress, ProgressStore, SolveMethod, TaskStatus};
use crate::report::ProgressReport;
use crate::statistics::CatalogProgress;
use crate::stats::{StatsStore, StreakChange, UserStats};
use crate::traits::KeyValueStore;
use crate::transfer::{self, ExportDocument};
use crate::validator::{self, Verdict};

/// Result of a solving event.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Solving events recorded for this task, including this one.
    pub attempts: u32,
    pub streak: StreakChange,
    /// Achievements earned by this event, to be announced once.
    pub newly_earned: Vec<&'static Achievement>,
}

/// Result of submitting an answer.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub verdict: Verdict,
    /// Present when the answer was accepted.
    pub solved: Option<SolveOutcome>,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// One user's tutoring session.
pub struct Tutor {
    catalog: Option<Catalog>,
    progress: ProgressStore,
    stats: StatsStore,
}

impl Tutor {
    /// Load progress and stats from `backend`. Pass `None` for the catalog to
    /// run without it; catalog-dependent operations then fail with
    /// [`TutorError::CatalogUnavailable`].
    pub fn new(catalog: Option<Catalog>, backend: Arc<dyn KeyValueStore>) -> Self {
        if catalog.is_none() {
            warn!("running without a task catalog");
        }
        Self {
            catalog,
            progress: ProgressStore::load(backend.clone()),
            stats: StatsStore::load(backend),
        }
    }

    pub fn catalog(&self) -> Result<&Catalog, TutorError> {
        self.catalog.as_ref().ok_or(TutorError::CatalogUnavailable)
    }

    pub fn progress(&self) -> &Progress {
        self.progress.progress()
    }

    pub fn stats(&self) -> &UserStats {
        self.stats.stats()
    }

    /// Look up an offered task.
    pub fn task(&self, key: &TaskKey) -> Result<&Task, TutorError> {
        self.catalog()?
            .find_offered_task(key)
            .ok_or_else(|| TutorError::TaskNotFound(key.to_string()))
    }

    /// Grade an answer; an accepted answer solves the task.
    #[instrument(skip(self, input, now), fields(task = %key))]
    pub fn submit_answer(
        &mut self,
        key: &TaskKey,
        input: &str,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<AnswerOutcome, TutorError> {
        if input.trim().is_empty() {
            return Err(TutorError::EmptyAnswer);
        }
        let verdict = validator::judge(input, &self.task(key)?.correct_answer);
        if !verdict.is_accepted() {
            info!(?verdict, "answer rejected");
            return Ok(AnswerOutcome {
                verdict,
                solved: None,
            });
        }

        info!(?verdict, "answer accepted");
        let solved = self.record_solve(key, SolveMethod::Answered, now, today);
        Ok(AnswerOutcome {
            verdict,
            solved: Some(solved),
        })
    }

    /// Mark a task as understood after reading its solution.
    #[instrument(skip(self, now), fields(task = %key))]
    pub fn mark_understood(
        &mut self,
        key: &TaskKey,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<SolveOutcome, TutorError> {
        self.task(key)?;
        Ok(self.record_solve(key, SolveMethod::Understood, now, today))
    }

    /// Flag a task as needing practice or as difficult.
    #[instrument(skip(self, now), fields(task = %key))]
    pub fn mark_status(
        &mut self,
        key: &TaskKey,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TutorError> {
        self.task(key)?;
        self.progress.mark_status(key.clone(), status, now);
        info!(%status, "task marked");
        Ok(())
    }

    fn record_solve(
        &mut self,
        key: &TaskKey,
        method: SolveMethod,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> SolveOutcome {
        let attempts = self.progress.mark_solved(key.clone(), method, now);
        let total = self.progress.progress().total_solved();
        let completion = self.completion();

        let (streak, newly_earned) = self.stats.update(|stats| {
            let streak = stats.record_activity(today);
            stats.refresh_total(total);
            let evaluated = achievements::evaluate(&AchievementContext {
                stats: &*stats,
                catalog: &completion,
            });
            let newly = achievements::merge_earned(&mut stats.achievements, &evaluated);
            (streak, newly)
        });

        for achievement in &newly_earned {
            info!(achievement = achievement.id, "achievement earned");
        }
        info!(
            %method,
            attempts,
            total_solved = total,
            current_streak = self.stats().current_streak,
            "task solved"
        );

        SolveOutcome {
            attempts,
            streak,
            newly_earned,
        }
    }

    fn completion(&self) -> CatalogProgress {
        match &self.catalog {
            Some(catalog) => CatalogProgress::compute(catalog, self.progress.progress()),
            None => CatalogProgress::default(),
        }
    }

    /// Per-category completion for the progress view.
    pub fn catalog_progress(&self) -> Result<CatalogProgress, TutorError> {
        Ok(CatalogProgress::compute(self.catalog()?, self.progress.progress()))
    }

    pub fn report(&self, now: DateTime<Utc>) -> Result<ProgressReport, TutorError> {
        Ok(ProgressReport::build(
            self.catalog()?,
            self.progress.progress(),
            self.stats.stats(),
            now,
        ))
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::new(self.progress().clone(), self.stats().clone(), now)
    }

    /// Replace progress and stats with an exported document. Nothing changes
    /// unless the whole document is valid.
    #[instrument(skip_all)]
    pub fn import(&mut self, content: &str) -> Result<(), TutorError> {
        let (progress, stats) = transfer::parse_import(content)?;
        info!(
            solved = progress.total_solved(),
            achievements = stats.achievements.len(),
            "importing progress"
        );
        self.progress.replace(progress);
        self.stats.replace(stats);
        Ok(())
    }

    /// Erase all progress and stats.
    #[instrument(skip_all)]
    pub fn reset(&mut self) {
        let progress_ok = self.progress.clear();
        let stats_ok = self.stats.clear();
        info!(removed = progress_ok && stats_ok, "progress reset");
    }

    /// Write both documents. Returns `false` if either write failed.
    pub fn flush(&self) -> bool {
        let progress_ok = self.progress.persist();
        let stats_ok = self.stats.persist();
        progress_ok && stats_ok
    }
}
