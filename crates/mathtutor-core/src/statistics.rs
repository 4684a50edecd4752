//! Per-category and per-subcategory completion figures.
//!
//! Only offered tasks that exist in the catalog count, so solved records for
//! retired tasks do not inflate percentages.

use serde::{Deserialize, Serialize};

use crate::model::{Catalog, TaskKey};
use crate::progress::Progress;

/// Completion of one subcategory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryProgress {
    pub subcategory_id: String,
    pub subcategory_name: String,
    pub total: usize,
    pub solved: usize,
}

/// Completion of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category_id: String,
    pub category_name: String,
    pub total: usize,
    pub solved: usize,
    pub subcategories: Vec<SubcategoryProgress>,
}

/// Completion of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogProgress {
    pub total: usize,
    pub solved: usize,
    pub categories: Vec<CategoryProgress>,
}

/// Percentage in `0.0..=100.0`; zero when there is nothing to solve.
pub fn percent(solved: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        solved as f64 / total as f64 * 100.0
    }
}

impl SubcategoryProgress {
    pub fn percent(&self) -> f64 {
        percent(self.solved, self.total)
    }
}

impl CategoryProgress {
    pub fn percent(&self) -> f64 {
        percent(self.solved, self.total)
    }

    /// Every offered task is solved. Empty categories are never complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.solved == self.total
    }

    pub fn is_started(&self) -> bool {
        self.solved > 0
    }
}

impl CatalogProgress {
    /// Cross the catalog with the solved log.
    pub fn compute(catalog: &Catalog, progress: &Progress) -> Self {
        let categories: Vec<CategoryProgress> = catalog
            .categories
            .iter()
            .map(|category| {
                let subcategories: Vec<SubcategoryProgress> = category
                    .subcategories
                    .iter()
                    .map(|sub| {
                        let solved = sub
                            .offered_tasks()
                            .filter(|t| {
                                progress.is_solved(&TaskKey::new(
                                    &category.category_id,
                                    &sub.subcategory_id,
                                    &t.id,
                                ))
                            })
                            .count();
                        SubcategoryProgress {
                            subcategory_id: sub.subcategory_id.clone(),
                            subcategory_name: sub.subcategory_name.clone(),
                            total: sub.offered_count(),
                            solved,
                        }
                    })
                    .collect();

                CategoryProgress {
                    category_id: category.category_id.clone(),
                    category_name: category.category_name.clone(),
                    total: subcategories.iter().map(|s| s.total).sum(),
                    solved: subcategories.iter().map(|s| s.solved).sum(),
                    subcategories,
                }
            })
            .collect();

        CatalogProgress {
            total: categories.iter().map(|c| c.total).sum(),
            solved: categories.iter().map(|c| c.solved).sum(),
            categories,
        }
    }

    pub fn percent(&self) -> f64 {
        percent(self.solved, self.total)
    }

    pub fn category(&self, category_id: &str) -> Option<&CategoryProgress> {
        self.categories.iter().find(|c| c.category_id == category_id)
    }

    /// Some category has all its offered tasks solved.
    pub fn has_complete_category(&self) -> bool {
        self.categories.iter().any(CategoryProgress::is_complete)
    }

    /// The catalog has categories and every one has at least one solved task.
    pub fn has_started_every_category(&self) -> bool {
        !self.categories.is_empty() && self.categories.iter().all(CategoryProgress::is_started)
    }

    /// Category with the lowest completion percentage (first wins on ties).
    pub fn weakest_category(&self) -> Option<&CategoryProgress> {
        self.categories.iter().fold(None, |best, c| match best {
            Some(b) if b.percent() <= c.percent() => Some(b),
            _ => Some(c),
        })
    }
}
