//! Configuration loading.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which calendar decides what "today" is for streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezonePolicy {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
}

impl TimezonePolicy {
    pub fn today(self) -> NaiveDate {
        match self {
            TimezonePolicy::Local => Local::now().date_naive(),
            TimezonePolicy::Utc => Utc::now().date_naive(),
        }
    }
}

impl FromStr for TimezonePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(TimezonePolicy::Local),
            "utc" => Ok(TimezonePolicy::Utc),
            other => Err(format!("unknown timezone policy: {other} (expected local or utc)")),
        }
    }
}

/// Top-level mathtutor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Catalog file path or `http(s)://` URL.
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// Directory holding the progress and stats documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub timezone: TimezonePolicy,
    /// Timeout for HTTP catalog fetches.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_catalog() -> String {
    "data/tasks.json".to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".mathtutor")
}
fn default_timeout() -> u64 {
    30
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            data_dir: default_data_dir(),
            timezone: TimezonePolicy::default(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl TutorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again, so a value containing `${` is
/// kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without a path:
/// 1. `mathtutor.toml` in the current directory
/// 2. `~/.config/mathtutor/config.toml`
///
/// Environment variable overrides: `MATHTUTOR_CATALOG`, `MATHTUTOR_DATA_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathtutor.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => TutorConfig::default(),
    };

    if let Ok(catalog) = std::env::var("MATHTUTOR_CATALOG") {
        config.catalog = catalog;
    }
    if let Ok(dir) = std::env::var("MATHTUTOR_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a TOML config document and expand `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<TutorConfig> {
    let mut config: TutorConfig = toml::from_str(content)?;
    config.catalog = resolve_env_vars(&config.catalog);
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathtutor"))
}
