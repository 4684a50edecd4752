//! Solved-task log and per-task status marks.
//!
//! Every mutation writes the whole progress document back to storage. A
//! failed write is logged and does not undo the in-memory change, so memory
//! and storage may diverge until the next successful write.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::TaskKey;
use crate::storage::{load_document, persist_document, remove_document, PROGRESS_KEY};
use crate::traits::KeyValueStore;

/// How a task came to be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMethod {
    /// The user typed an accepted answer.
    Answered,
    /// The user read the solution and marked the task as understood.
    Understood,
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveMethod::Answered => write!(f, "answered"),
            SolveMethod::Understood => write!(f, "understood"),
        }
    }
}

/// A manual mark on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NeedsPractice,
    Difficult,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NeedsPractice => write!(f, "needs_practice"),
            TaskStatus::Difficult => write!(f, "difficult"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "needs_practice" | "practice" => Ok(TaskStatus::NeedsPractice),
            "difficult" | "hard" => Ok(TaskStatus::Difficult),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// One entry in the solved log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedRecord {
    /// Time of the latest solving event.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Method of the latest solving event.
    pub method: SolveMethod,
    /// Number of solving events for this task.
    pub attempts: u32,
}

/// The latest manual mark on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusRecord {
    pub status: TaskStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// The persisted progress document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub solved_tasks: BTreeMap<TaskKey, SolvedRecord>,
    #[serde(default)]
    pub task_progress: BTreeMap<TaskKey, TaskStatusRecord>,
}

impl Progress {
    /// Upsert a solved record. Returns the attempt count after the update.
    pub fn mark_solved(&mut self, key: TaskKey, method: SolveMethod, now: DateTime<Utc>) -> u32 {
        let record = self
            .solved_tasks
            .entry(key)
            .and_modify(|r| {
                r.attempts = r.attempts.saturating_add(1);
                r.timestamp = now;
                r.method = method;
            })
            .or_insert(SolvedRecord {
                timestamp: now,
                method,
                attempts: 1,
            });
        record.attempts
    }

    /// Replace any previous mark for the task.
    pub fn mark_status(&mut self, key: TaskKey, status: TaskStatus, now: DateTime<Utc>) {
        self.task_progress.insert(
            key,
            TaskStatusRecord {
                status,
                timestamp: now,
            },
        );
    }

    pub fn is_solved(&self, key: &TaskKey) -> bool {
        self.solved_tasks.contains_key(key)
    }

    /// Count solved records in a category, optionally narrowed to a subcategory.
    pub fn count_solved(&self, category_id: &str, subcategory_id: Option<&str>) -> usize {
        self.solved_tasks
            .keys()
            .filter(|k| k.is_within(category_id, subcategory_id))
            .count()
    }

    /// Size of the solved key set.
    pub fn total_solved(&self) -> usize {
        self.solved_tasks.len()
    }

    pub fn solved_record(&self, key: &TaskKey) -> Option<&SolvedRecord> {
        self.solved_tasks.get(key)
    }

    pub fn status_of(&self, key: &TaskKey) -> Option<TaskStatus> {
        self.task_progress.get(key).map(|r| r.status)
    }

    /// Keys currently carrying the given mark, in key order.
    pub fn tasks_with_status(&self, status: TaskStatus) -> impl Iterator<Item = &TaskKey> {
        self.task_progress
            .iter()
            .filter(move |(_, r)| r.status == status)
            .map(|(k, _)| k)
    }
}

/// [`Progress`] bound to the storage it is persisted in.
pub struct ProgressStore {
    progress: Progress,
    backend: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    /// Load progress from the backend, starting empty if nothing usable is stored.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let progress: Progress = load_document(backend.as_ref(), PROGRESS_KEY);
        debug!(solved = progress.total_solved(), "progress loaded");
        Self { progress, backend }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn mark_solved(&mut self, key: TaskKey, method: SolveMethod, now: DateTime<Utc>) -> u32 {
        let attempts = self.progress.mark_solved(key, method, now);
        self.persist();
        attempts
    }

    pub fn mark_status(&mut self, key: TaskKey, status: TaskStatus, now: DateTime<Utc>) {
        self.progress.mark_status(key, status, now);
        self.persist();
    }

    pub fn is_solved(&self, key: &TaskKey) -> bool {
        self.progress.is_solved(key)
    }

    pub fn count_solved(&self, category_id: &str, subcategory_id: Option<&str>) -> usize {
        self.progress.count_solved(category_id, subcategory_id)
    }

    /// Swap in a whole document (import or reset) and persist it.
    pub fn replace(&mut self, progress: Progress) {
        self.progress = progress;
        self.persist();
    }

    /// Forget all progress and delete the stored document.
    pub fn clear(&mut self) -> bool {
        self.progress = Progress::default();
        remove_document(self.backend.as_ref(), PROGRESS_KEY)
    }

    /// Write the current document. Returns `false` if the write failed.
    pub fn persist(&self) -> bool {
        persist_document(self.backend.as_ref(), PROGRESS_KEY, &self.progress)
    }
}
