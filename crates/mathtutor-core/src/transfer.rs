//! Progress export and import.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ImportError;
use crate::progress::Progress;
use crate::stats::UserStats;

/// The export file document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub progress: Progress,
    pub stats: UserStats,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn new(progress: Progress, stats: UserStats, export_date: DateTime<Utc>) -> Self {
        Self {
            progress,
            stats,
            export_date,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `math-tutor-progress-YYYY-MM-DD.json`
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("math-tutor-progress-{}.json", date.format("%Y-%m-%d"))
}

/// Parse an export document. Both `progress` and `stats` must be present and
/// well-formed; `exportDate` and any other keys are ignored.
pub fn parse_import(content: &str) -> Result<(Progress, UserStats), ImportError> {
    let value: Value = serde_json::from_str(content).map_err(ImportError::Malformed)?;

    let progress = section(&value, "progress")?;
    let stats = section(&value, "stats")?;
    Ok((progress, stats))
}

fn section<T: DeserializeOwned>(
    value: &Value,
    name: &'static str,
) -> Result<T, ImportError> {
    match value.get(name) {
        None | Some(Value::Null) => Err(ImportError::MissingKey(name)),
        Some(v) => T::deserialize(v).map_err(|source| ImportError::InvalidSection {
            section: name,
            source,
        }),
    }
}
