//! Core catalog types for mathtutor.
//!
//! The catalog is a read-only hierarchy of categories, subcategories and
//! tasks, loaded once per session from a JSON document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when a [`TaskKey`] is written as a single string.
pub const KEY_SEPARATOR: char = '/';

/// A single practice problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, unique within its subcategory.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Problem statement (may contain markup).
    pub problem_text: String,
    /// Reference answer compared against user input. Empty when absent.
    #[serde(default)]
    pub correct_answer: String,
    /// Worked solution (may contain markup).
    #[serde(default)]
    pub solution_text: String,
    /// Explicit difficulty, if the catalog provides one.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Whether the task is currently offered.
    pub is_actual: bool,
}

impl Task {
    /// The declared difficulty, or one estimated from the problem length.
    pub fn effective_difficulty(&self) -> Difficulty {
        if let Some(d) = self.difficulty {
            return d;
        }
        let len = strip_markup(&self.problem_text).chars().count();
        if len < 200 {
            Difficulty::Easy
        } else if len < 400 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

/// A group of related tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(deserialize_with = "id_string")]
    pub subcategory_id: String,
    pub subcategory_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Subcategory {
    /// Tasks currently offered, in catalog order.
    pub fn offered_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_actual)
    }

    /// Number of offered tasks.
    pub fn offered_count(&self) -> usize {
        self.offered_tasks().count()
    }
}

/// A top-level topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "id_string")]
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn find_subcategory(&self, subcategory_id: &str) -> Option<&Subcategory> {
        self.subcategories
            .iter()
            .find(|s| s.subcategory_id == subcategory_id)
    }

    /// Number of offered tasks across all subcategories.
    pub fn offered_count(&self) -> usize {
        self.subcategories.iter().map(Subcategory::offered_count).sum()
    }
}

/// The whole task hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn find_category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.category_id == category_id)
    }

    pub fn find_subcategory(&self, category_id: &str, subcategory_id: &str) -> Option<&Subcategory> {
        self.find_category(category_id)?
            .find_subcategory(subcategory_id)
    }

    /// Look up an offered task. Tasks with `isActual = false` are not returned.
    pub fn find_offered_task(&self, key: &TaskKey) -> Option<&Task> {
        self.find_subcategory(&key.category_id, &key.subcategory_id)?
            .offered_tasks()
            .find(|t| t.id == key.task_id)
    }

    /// Number of offered tasks in the whole catalog.
    pub fn total_offered_tasks(&self) -> usize {
        self.categories.iter().map(Category::offered_count).sum()
    }

    /// Every offered task with its key, in catalog order.
    pub fn offered_tasks(&self) -> impl Iterator<Item = (TaskKey, &Task)> {
        self.categories.iter().flat_map(|c| {
            c.subcategories.iter().flat_map(move |s| {
                s.offered_tasks().map(move |t| {
                    (
                        TaskKey::new(&c.category_id, &s.subcategory_id, &t.id),
                        t,
                    )
                })
            })
        })
    }
}

/// Task difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Identifies one task across the catalog and the progress log.
///
/// Serialized as `category/subcategory/task`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskKey {
    pub category_id: String,
    pub subcategory_id: String,
    pub task_id: String,
}

impl TaskKey {
    pub fn new(
        category_id: impl Into<String>,
        subcategory_id: impl Into<String>,
        task_id: impl Into<String>,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            subcategory_id: subcategory_id.into(),
            task_id: task_id.into(),
        }
    }

    /// True if the key lies in the given category and, when given, subcategory.
    pub fn is_within(&self, category_id: &str, subcategory_id: Option<&str>) -> bool {
        self.category_id == category_id
            && subcategory_id.map_or(true, |s| self.subcategory_id == s)
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.category_id,
            self.subcategory_id,
            self.task_id,
            sep = KEY_SEPARATOR
        )
    }
}

impl FromStr for TaskKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(3, KEY_SEPARATOR).collect();
        match parts.as_slice() {
            [cat, sub, task] if !cat.is_empty() && !sub.is_empty() && !task.is_empty() => {
                Ok(TaskKey::new(*cat, *sub, *task))
            }
            _ => Err(format!("invalid task key: '{s}'")),
        }
    }
}

impl Serialize for TaskKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Accept ids written either as JSON strings or as integers.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Drop `<...>` tags and collapse the remaining text.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "categories": [{
            "categoryId": "algebra",
            "categoryName": "Algebra",
            "subcategories": [{
                "subcategoryId": "linear",
                "subcategoryName": "Linear equations",
                "tasks": [
                    {"id": 1, "problemText": "<p>2x = 6</p>", "correctAnswer": "3", "isActual": true},
                    {"id": "2", "problemText": "x + 1 = 0", "correctAnswer": "-1", "isActual": false, "difficulty": "hard"}
                ]
            }]
        }]
    }"#;

    #[test]
    fn parses_numeric_and_string_ids() {
        let catalog: Catalog = serde_json::from_str(CATALOG_JSON).unwrap();
        let tasks = &catalog.categories[0].subcategories[0].tasks;
        assert_eq!(tasks[0].id, "1");
        assert_eq!(tasks[1].id, "2");
        assert_eq!(tasks[1].difficulty, Some(Difficulty::Hard));
        assert!(tasks[0].solution_text.is_empty());
    }

    #[test]
    fn only_offered_tasks_are_found() {
        let catalog: Catalog = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(catalog.total_offered_tasks(), 1);
        assert!(catalog
            .find_offered_task(&TaskKey::new("algebra", "linear", "1"))
            .is_some());
        assert!(catalog
            .find_offered_task(&TaskKey::new("algebra", "linear", "2"))
            .is_none());
        assert_eq!(catalog.offered_tasks().count(), 1);
    }

    #[test]
    fn missing_is_actual_is_rejected() {
        let json = r#"{"id": "1", "problemText": "p", "correctAnswer": "1"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn task_key_display_and_parse() {
        let key = TaskKey::new("algebra", "linear", "7");
        assert_eq!(key.to_string(), "algebra/linear/7");
        assert_eq!("algebra/linear/7".parse::<TaskKey>().unwrap(), key);
        assert!("algebra/linear".parse::<TaskKey>().is_err());
        assert!("//".parse::<TaskKey>().is_err());
    }

    #[test]
    fn task_key_scoping_is_exact() {
        let key = TaskKey::new("algebra", "linear", "1");
        assert!(key.is_within("algebra", None));
        assert!(key.is_within("algebra", Some("linear")));
        assert!(!key.is_within("alg", None));
        assert!(!key.is_within("algebra", Some("quadratic")));
    }

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_falls_back_to_problem_length() {
        let mut task = Task {
            id: "1".into(),
            problem_text: format!("<b>{}</b>", "x".repeat(150)),
            correct_answer: "1".into(),
            solution_text: String::new(),
            difficulty: None,
            is_actual: true,
        };
        assert_eq!(task.effective_difficulty(), Difficulty::Easy);
        task.problem_text = "x".repeat(250);
        assert_eq!(task.effective_difficulty(), Difficulty::Medium);
        task.problem_text = "x".repeat(450);
        assert_eq!(task.effective_difficulty(), Difficulty::Hard);
        task.difficulty = Some(Difficulty::Easy);
        assert_eq!(task.effective_difficulty(), Difficulty::Easy);
    }

    #[test]
    fn strip_markup_removes_tags() {
        assert_eq!(strip_markup("<p>Solve <i>x</i></p>"), "Solve x");
    }
}
