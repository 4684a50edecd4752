//! The `mathtutor report` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::session::Session;
use crate::{GlobalArgs, ReportFormat};

pub async fn execute(
    global: &GlobalArgs,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(global, true).await?;
    let report = session.tutor.report(Utc::now())?;

    let rendered = match format {
        ReportFormat::Markdown => report.to_markdown(),
        ReportFormat::Json => {
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        }
        ReportFormat::Text => report.to_text(),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    session.close();
    Ok(())
}
