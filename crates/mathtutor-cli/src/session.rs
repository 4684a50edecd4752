//! Wiring shared by the stateful commands: config, storage, catalog, tutor.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use mathtutor_core::model::{Catalog, TaskKey};
use mathtutor_core::tutor::Tutor;
use mathtutor_storage::{catalog_source_for, load_config_from, FileStore, TutorConfig};

use crate::GlobalArgs;

/// Resolve the effective config: file, then env, then command-line flags.
pub fn resolve_config(global: &GlobalArgs) -> Result<TutorConfig> {
    let mut config = load_config_from(global.config.as_deref())?;
    if let Some(catalog) = &global.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(dir) = &global.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

/// Fetch the catalog named in the config.
pub async fn load_catalog(config: &TutorConfig) -> Result<Catalog> {
    let source = catalog_source_for(&config.catalog, Some(config.request_timeout()))?;
    let catalog = source
        .load()
        .await
        .with_context(|| format!("failed to load catalog from {}", source.location()))?;
    Ok(catalog)
}

pub struct Session {
    pub tutor: Tutor,
    today: NaiveDate,
}

impl Session {
    /// Open the data directory and, when `with_catalog` is set, try to load the
    /// catalog. A catalog that fails to load leaves the session in reduced mode.
    pub async fn open(global: &GlobalArgs, with_catalog: bool) -> Result<Self> {
        let config = resolve_config(global)?;
        let store = FileStore::open(&config.data_dir).with_context(|| {
            format!("failed to open data directory {}", config.data_dir.display())
        })?;

        let catalog = if with_catalog {
            match load_catalog(&config).await {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    warn!("{e:#}; continuing without the task catalog");
                    None
                }
            }
        } else {
            None
        };

        let today = global.today.unwrap_or_else(|| config.timezone.today());
        Ok(Self {
            tutor: Tutor::new(catalog, Arc::new(store)),
            today,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Flush both documents before exiting.
    pub fn close(self) {
        if !self.tutor.flush() {
            warn!("some progress could not be saved");
        }
    }
}

/// Parse a `category/subcategory/task` key from the command line.
pub fn parse_task_key(raw: &str) -> Result<TaskKey> {
    raw.parse::<TaskKey>()
        .map_err(|e| anyhow::anyhow!("{e} (expected category/subcategory/task)"))
}

/// Print a one-time notice for each newly earned achievement.
pub fn announce_achievements(earned: &[&'static mathtutor_core::achievements::Achievement]) {
    for a in earned {
        println!("Achievement unlocked: {} {} ({})", a.icon, a.name, a.description);
    }
}
