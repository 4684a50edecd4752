//! JSON catalog parser and structural validation.
//!
//! Loads the task catalog, checks that every key can be addressed
//! unambiguously, and reports softer content problems as warnings.

use std::collections::HashSet;
use std::fmt;

use crate::error::CatalogError;
use crate::model::{Catalog, KEY_SEPARATOR};

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The catalog cannot be used.
    Error,
    /// The catalog loads, but something looks wrong.
    Warning,
}

/// A finding from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// `category/subcategory/task` path of the offending item, if any.
    pub location: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: Some(location.into()),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: Some(location.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "[{loc}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Parse and validate a catalog document. Warnings are logged, errors reject it.
pub fn parse_catalog_str(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(content)?;

    let issues = validate_catalog(&catalog);
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        return Err(CatalogError::Invalid(errors));
    }
    for warning in &issues {
        tracing::warn!("catalog: {warning}");
    }

    tracing::debug!(
        categories = catalog.categories.len(),
        offered_tasks = catalog.total_offered_tasks(),
        "catalog parsed"
    );
    Ok(catalog)
}

fn check_id(issues: &mut Vec<ValidationIssue>, location: &str, kind: &str, id: &str) {
    if id.trim().is_empty() {
        issues.push(ValidationIssue::error(location, format!("{kind} id is empty")));
    } else if id.contains(KEY_SEPARATOR) {
        issues.push(ValidationIssue::error(
            location,
            format!("{kind} id '{id}' must not contain '{KEY_SEPARATOR}'"),
        ));
    }
}

/// Check a catalog for structural errors and content warnings.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if catalog.categories.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            location: None,
            message: "catalog has no categories".into(),
        });
    }

    let mut category_ids = HashSet::new();
    for category in &catalog.categories {
        let cat_loc = category.category_id.clone();
        check_id(&mut issues, &cat_loc, "category", &category.category_id);
        if !category_ids.insert(&category.category_id) {
            issues.push(ValidationIssue::error(
                &cat_loc,
                format!("duplicate category id: {}", category.category_id),
            ));
        }
        if category.subcategories.is_empty() {
            issues.push(ValidationIssue::warning(&cat_loc, "category has no subcategories"));
        }

        let mut subcategory_ids = HashSet::new();
        for sub in &category.subcategories {
            let sub_loc = format!("{cat_loc}{KEY_SEPARATOR}{}", sub.subcategory_id);
            check_id(&mut issues, &sub_loc, "subcategory", &sub.subcategory_id);
            if !subcategory_ids.insert(&sub.subcategory_id) {
                issues.push(ValidationIssue::error(
                    &sub_loc,
                    format!("duplicate subcategory id: {}", sub.subcategory_id),
                ));
            }
            if sub.offered_count() == 0 {
                issues.push(ValidationIssue::warning(&sub_loc, "subcategory offers no tasks"));
            }

            let mut task_ids = HashSet::new();
            for task in &sub.tasks {
                let task_loc = format!("{sub_loc}{KEY_SEPARATOR}{}", task.id);
                check_id(&mut issues, &task_loc, "task", &task.id);
                if !task_ids.insert(&task.id) {
                    issues.push(ValidationIssue::error(
                        &task_loc,
                        format!("duplicate task id: {}", task.id),
                    ));
                }
                if task.problem_text.trim().is_empty() {
                    issues.push(ValidationIssue::warning(&task_loc, "problemText is empty"));
                }
                if task.is_actual && task.correct_answer.is_empty() {
                    issues.push(ValidationIssue::warning(
                        &task_loc,
                        "offered task has no correctAnswer; it can only be marked as understood",
                    ));
                }
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{
        "categories": [{
            "categoryId": "algebra",
            "categoryName": "Algebra",
            "description": "Equations and expressions",
            "subcategories": [{
                "subcategoryId": "linear",
                "subcategoryName": "Linear equations",
                "description": "ax + b = 0",
                "tasks": [
                    {
                        "id": "1",
                        "problemText": "<p>Solve 2x = 6</p>",
                        "correctAnswer": "3",
                        "solutionText": "x = 6 / 2 = 3",
                        "difficulty": "easy",
                        "isActual": true
                    },
                    {
                        "id": "2",
                        "problemText": "Solve x + 1 = 0",
                        "correctAnswer": "-1",
                        "isActual": true
                    }
                ]
            }]
        }]
    }"#;

    #[test]
    fn parse_valid_catalog() {
        let catalog = parse_catalog_str(VALID_JSON).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].subcategories[0].tasks.len(), 2);
        assert_eq!(catalog.total_offered_tasks(), 2);
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_catalog_str("{ not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let json = r#"{"categories": [{"categoryId": "a", "subcategories": []}]}"#;
        assert!(matches!(parse_catalog_str(json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn duplicate_task_ids_are_rejected() {
        let json = VALID_JSON.replace(r#""id": "2""#, r#""id": "1""#);
        let err = parse_catalog_str(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate task id"));
    }

    #[test]
    fn separator_in_id_is_rejected() {
        let json = VALID_JSON.replace(r#""linear""#, r#""lin/ear""#);
        let err = parse_catalog_str(&json).unwrap_err();
        assert!(err.to_string().contains("must not contain"));
    }

    #[test]
    fn warnings_do_not_reject() {
        let json = VALID_JSON.replace(r#""correctAnswer": "-1""#, r#""correctAnswer": """#);
        let catalog = parse_catalog_str(&json).unwrap();
        let issues = validate_catalog(&catalog);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].location.as_deref(), Some("algebra/linear/2"));
    }

    #[test]
    fn task_without_answer_still_loads() {
        let json = VALID_JSON.replace(r#""correctAnswer": "-1","#, "");
        let catalog = parse_catalog_str(&json).unwrap();
        let task = &catalog.categories[0].subcategories[0].tasks[1];
        assert!(task.correct_answer.is_empty());
        assert_eq!(
            crate::validator::judge("-1", &task.correct_answer),
            crate::validator::Verdict::NoReference
        );

        let issues = validate_catalog(&catalog);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("no correctAnswer"));
    }

    #[test]
    fn empty_catalog_warns() {
        let catalog = parse_catalog_str(r#"{"categories": []}"#).unwrap();
        let issues = validate_catalog(&catalog);
        assert!(issues.iter().any(|i| i.message.contains("no categories")));
    }
}
