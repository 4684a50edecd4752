//! Progress report, recommendations and difficult topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements;
use crate::model::Catalog;
use crate::progress::{Progress, TaskStatus};
use crate::statistics::CatalogProgress;
use crate::stats::UserStats;

/// At most this many difficult topics are listed.
pub const MAX_DIFFICULT_TOPICS: usize = 5;

/// Categories below this completion percentage get a recommendation.
const WEAK_CATEGORY_PERCENT: f64 = 50.0;

/// A full progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub categories: Vec<CategoryRow>,
    /// Names of earned achievements, in registry order.
    pub achievements: Vec<String>,
    pub recommendations: Vec<String>,
    pub difficult_topics: Vec<String>,
}

/// Headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub solved_tasks: usize,
    /// Rounded completion percentage.
    pub progress: u32,
    pub current_streak: u32,
    pub max_streak: u32,
}

/// One row per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub name: String,
    pub progress: u32,
    pub total_tasks: usize,
    pub solved_tasks: usize,
}

impl ProgressReport {
    pub fn build(
        catalog: &Catalog,
        progress: &Progress,
        stats: &UserStats,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let completion = CatalogProgress::compute(catalog, progress);

        let categories = completion
            .categories
            .iter()
            .map(|c| CategoryRow {
                name: c.category_name.clone(),
                progress: c.percent().round() as u32,
                total_tasks: c.total,
                solved_tasks: c.solved,
            })
            .collect();

        let achievements = achievements::ACHIEVEMENTS
            .iter()
            .filter(|a| stats.achievements.contains(a.id))
            .map(|a| a.name.to_string())
            .collect();

        Self {
            generated_at,
            summary: ReportSummary {
                total_tasks: completion.total,
                solved_tasks: completion.solved,
                progress: completion.percent().round() as u32,
                current_streak: stats.current_streak,
                max_streak: stats.max_streak,
            },
            categories,
            achievements,
            recommendations: recommendations(progress, stats, &completion),
            difficult_topics: difficult_topics(catalog, progress),
        }
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let s = &self.summary;

        md.push_str("# Math Tutor Progress Report\n\n");
        md.push_str(&format!(
            "Generated: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Solved | Total | Progress | Current streak | Best streak |\n");
        md.push_str("|--------|-------|----------|----------------|-------------|\n");
        md.push_str(&format!(
            "| {} | {} | {}% | {} | {} |\n\n",
            s.solved_tasks, s.total_tasks, s.progress, s.current_streak, s.max_streak
        ));

        if !self.categories.is_empty() {
            md.push_str("## Categories\n\n");
            md.push_str("| Category | Solved | Total | Progress |\n");
            md.push_str("|----------|--------|-------|----------|\n");
            for c in &self.categories {
                md.push_str(&format!(
                    "| {} | {} | {} | {}% |\n",
                    c.name, c.solved_tasks, c.total_tasks, c.progress
                ));
            }
            md.push('\n');
        }

        push_list(&mut md, "## Achievements", &self.achievements);
        push_list(&mut md, "## Recommendations", &self.recommendations);
        push_list(&mut md, "## Difficult topics", &self.difficult_topics);

        md
    }

    /// Render the report as plain text.
    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut out = format!(
            "Solved {}/{} tasks ({}%)\nCurrent streak: {} days, best: {} days\n",
            s.solved_tasks, s.total_tasks, s.progress, s.current_streak, s.max_streak
        );

        if !self.categories.is_empty() {
            out.push_str("\nCategories:\n");
            for c in &self.categories {
                out.push_str(&format!(
                    "  {:<30} {:>4}/{:<4} {:>3}%\n",
                    c.name, c.solved_tasks, c.total_tasks, c.progress
                ));
            }
        }

        let sections = [
            ("Achievements", &self.achievements),
            ("Recommendations", &self.recommendations),
            ("Difficult topics", &self.difficult_topics),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{title}:\n"));
            for item in items {
                out.push_str(&format!("  - {item}\n"));
            }
        }
        out
    }
}

fn push_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(heading);
    md.push_str("\n\n");
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}

/// Personalized study hints.
pub fn recommendations(
    progress: &Progress,
    stats: &UserStats,
    completion: &CatalogProgress,
) -> Vec<String> {
    let total_solved = progress.total_solved();
    if total_solved == 0 {
        return vec!["Start by solving the first tasks in any category".to_string()];
    }

    let mut recs = Vec::new();

    if stats.current_streak == 0 {
        recs.push("Try to solve tasks every day to keep a steady rhythm".to_string());
    }

    if let Some(weakest) = completion.weakest_category() {
        if weakest.percent() < WEAK_CATEGORY_PERCENT {
            recs.push(format!(
                "Spend more time on the \"{}\" category",
                weakest.category_name
            ));
        }
    }

    let needs_practice = progress.tasks_with_status(TaskStatus::NeedsPractice).count();
    if needs_practice > 0 {
        recs.push(format!(
            "You have {needs_practice} task(s) marked for extra practice"
        ));
    }

    if total_solved >= 10 && stats.current_streak >= 3 {
        recs.push("Great progress! Try the more difficult categories".to_string());
    }

    recs
}

/// Distinct `Category - Subcategory` names of tasks marked difficult.
/// Marks on tasks no longer in the catalog are skipped.
pub fn difficult_topics(catalog: &Catalog, progress: &Progress) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for key in progress.tasks_with_status(TaskStatus::Difficult) {
        let Some(category) = catalog.find_category(&key.category_id) else {
            continue;
        };
        let Some(sub) = category.find_subcategory(&key.subcategory_id) else {
            continue;
        };
        let topic = format!("{} - {}", category.category_name, sub.subcategory_name);
        if !topics.contains(&topic) {
            topics.push(topic);
        }
        if topics.len() == MAX_DIFFICULT_TOPICS {
            break;
        }
    }
    topics
}
