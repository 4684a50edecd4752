//! User statistics and the daily streak state machine.
//!
//! Streaks are counted in calendar days. Which calendar "today" belongs to is
//! the caller's choice; see `TimezonePolicy` in `mathtutor-storage`.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{load_document, persist_document, remove_document, STATS_KEY};
use crate::traits::KeyValueStore;

/// Cached counters derived from the progress log and activity dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_solved: usize,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub max_streak: u32,
    #[serde(default, with = "activity_date")]
    pub last_activity_date: Option<NaiveDate>,
    /// Every achievement ever earned. Never shrinks.
    #[serde(default)]
    pub achievements: BTreeSet<String>,
}

/// What a qualifying activity did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Activity was already counted today.
    AlreadyCounted,
    /// Yesterday was active, the streak grew by one.
    Extended,
    /// No activity yesterday (or ever); the streak restarted at one.
    Restarted,
}

impl UserStats {
    /// Apply one qualifying activity on `today`.
    pub fn record_activity(&mut self, today: NaiveDate) -> StreakChange {
        let change = match self.last_activity_date {
            Some(last) if last == today => return StreakChange::AlreadyCounted,
            Some(last) if today.signed_duration_since(last).num_days() == 1 => {
                self.current_streak = self.current_streak.saturating_add(1);
                StreakChange::Extended
            }
            _ => {
                self.current_streak = 1;
                StreakChange::Restarted
            }
        };
        self.max_streak = self.max_streak.max(self.current_streak);
        self.last_activity_date = Some(today);
        change
    }

    /// Set `total_solved` from the size of the solved key set.
    pub fn refresh_total(&mut self, solved: usize) {
        self.total_solved = solved;
        self.max_streak = self.max_streak.max(self.current_streak);
    }
}

/// [`UserStats`] bound to the storage it is persisted in.
pub struct StatsStore {
    stats: UserStats,
    backend: Arc<dyn KeyValueStore>,
}

impl StatsStore {
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let stats: UserStats = load_document(backend.as_ref(), STATS_KEY);
        debug!(
            current_streak = stats.current_streak,
            achievements = stats.achievements.len(),
            "stats loaded"
        );
        Self { stats, backend }
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Mutate the stats and persist the result.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut UserStats) -> R) -> R {
        let out = f(&mut self.stats);
        self.persist();
        out
    }

    /// Swap in a whole document (import or reset) and persist it.
    pub fn replace(&mut self, stats: UserStats) {
        self.stats = stats;
        self.persist();
    }

    pub fn clear(&mut self) -> bool {
        self.stats = UserStats::default();
        remove_document(self.backend.as_ref(), STATS_KEY)
    }

    pub fn persist(&self) -> bool {
        persist_document(self.backend.as_ref(), STATS_KEY, &self.stats)
    }
}

/// `YYYY-MM-DD` on write; also accepts the legacy `Fri Oct 16 2026` form on read.
mod activity_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const ISO: &str = "%Y-%m-%d";
    const LEGACY: &str = "%a %b %d %Y";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format(ISO)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, ISO)
                .or_else(|_| NaiveDate::parse_from_str(s, LEGACY))
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid activity date: {s}"))),
        }
    }
}
