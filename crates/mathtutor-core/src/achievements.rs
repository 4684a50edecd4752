//! Achievement registry and evaluation.
//!
//! Achievements are plain predicates over a read-only [`AchievementContext`].
//! Evaluation is pure; [`merge_earned`] is the only place the persisted set
//! changes, and it only ever grows.

use std::collections::BTreeSet;

use crate::statistics::CatalogProgress;
use crate::stats::UserStats;

/// What an achievement predicate can look at.
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub stats: &'a UserStats,
    pub catalog: &'a CatalogProgress,
}

/// A named milestone.
#[derive(Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub predicate: fn(&AchievementContext<'_>) -> bool,
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl Achievement {
    pub fn is_satisfied(&self, ctx: &AchievementContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

/// Every achievement, in display order.
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_steps",
        name: "First Steps",
        icon: "🚀",
        description: "Solve your first task",
        predicate: has_solved_any,
    },
    Achievement {
        id: "streak_3",
        name: "Consistency",
        icon: "🔥",
        description: "Practice 3 days in a row",
        predicate: streak_of_3,
    },
    Achievement {
        id: "streak_7",
        name: "Week of Knowledge",
        icon: "📚",
        description: "Practice 7 days in a row",
        predicate: streak_of_7,
    },
    Achievement {
        id: "tasks_10",
        name: "Ten Down",
        icon: "💪",
        description: "Solve 10 tasks",
        predicate: solved_10,
    },
    Achievement {
        id: "tasks_50",
        name: "Half Century",
        icon: "⭐",
        description: "Solve 50 tasks",
        predicate: solved_50,
    },
    Achievement {
        id: "tasks_100",
        name: "Centurion",
        icon: "🏆",
        description: "Solve 100 tasks",
        predicate: solved_100,
    },
    Achievement {
        id: "perfect_category",
        name: "Perfection",
        icon: "💎",
        description: "Complete a category to 100%",
        predicate: completed_a_category,
    },
    Achievement {
        id: "math_wizard",
        name: "Math Wizard",
        icon: "🧙",
        description: "Solve tasks in every category",
        predicate: started_every_category,
    },
];

fn has_solved_any(ctx: &AchievementContext<'_>) -> bool {
    ctx.stats.total_solved > 0
}

fn streak_of_3(ctx: &AchievementContext<'_>) -> bool {
    ctx.stats.current_streak >= 3
}

fn streak_of_7(ctx: &AchievementContext<'_>) -> bool {
    ctx.stats.current_streak >= 7
}

fn solved_10(ctx: &AchievementContext<'_>) -> bool {
    ctx.stats.total_solved >= 10
}

fn solved_50(ctx: &AchievementContext<'_>) -> bool {
    ctx.stats.total_solved >= 50
}

fn solved_100(ctx: &AchievementContext<'_>) -> bool {
    ctx.stats.total_solved >= 100
}

fn completed_a_category(ctx: &AchievementContext<'_>) -> bool {
    ctx.catalog.has_complete_category()
}

fn started_every_category(ctx: &AchievementContext<'_>) -> bool {
    ctx.catalog.has_started_every_category()
}

/// Ids of every achievement whose predicate currently holds.
pub fn evaluate(ctx: &AchievementContext<'_>) -> BTreeSet<&'static str> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.is_satisfied(ctx))
        .map(|a| a.id)
        .collect()
}

/// Union `evaluated` into the earned set and return the newly earned ones,
/// in registry order.
pub fn merge_earned(
    earned: &mut BTreeSet<String>,
    evaluated: &BTreeSet<&'static str>,
) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| evaluated.contains(a.id))
        .filter(|a| earned.insert(a.id.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::CategoryProgress;

    fn category(total: usize, solved: usize) -> CategoryProgress {
        CategoryProgress {
            category_id: format!("c{total}{solved}"),
            category_name: "C".into(),
            total,
            solved,
            subcategories: vec![],
        }
    }

    fn ids(stats: &UserStats, catalog: &CatalogProgress) -> BTreeSet<&'static str> {
        evaluate(&AchievementContext { stats, catalog })
    }

    #[test]
    fn registry_ids_are_unique() {
        let unique: BTreeSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(unique.len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn thresholds() {
        let catalog = CatalogProgress::default();
        let mut stats = UserStats::default();
        assert!(ids(&stats, &catalog).is_empty());

        stats.total_solved = 1;
        assert_eq!(ids(&stats, &catalog), BTreeSet::from(["first_steps"]));

        stats.total_solved = 10;
        stats.current_streak = 3;
        assert_eq!(
            ids(&stats, &catalog),
            BTreeSet::from(["first_steps", "streak_3", "tasks_10"])
        );

        stats.total_solved = 100;
        stats.current_streak = 7;
        assert_eq!(ids(&stats, &catalog).len(), 6);
    }

    #[test]
    fn catalog_predicates() {
        let stats = UserStats::default();
        let catalog = CatalogProgress {
            total: 3,
            solved: 2,
            categories: vec![category(1, 1), category(2, 1)],
        };
        let got = ids(&stats, &catalog);
        assert!(got.contains("perfect_category"));
        assert!(got.contains("math_wizard"));

        let untouched = CatalogProgress {
            total: 3,
            solved: 1,
            categories: vec![category(2, 1), category(1, 0)],
        };
        let got = ids(&stats, &untouched);
        assert!(!got.contains("perfect_category"));
        assert!(!got.contains("math_wizard"));
    }

    #[test]
    fn merge_is_monotonic_and_reports_new_only() {
        let mut earned = BTreeSet::from(["streak_3".to_string()]);

        let newly = merge_earned(&mut earned, &BTreeSet::from(["first_steps", "streak_3"]));
        assert_eq!(newly.iter().map(|a| a.id).collect::<Vec<_>>(), vec!["first_steps"]);

        // A later evaluation where streak_3 no longer holds keeps it earned.
        let newly = merge_earned(&mut earned, &BTreeSet::from(["first_steps"]));
        assert!(newly.is_empty());
        assert!(earned.contains("streak_3"));
        assert_eq!(earned.len(), 2);
    }
}
