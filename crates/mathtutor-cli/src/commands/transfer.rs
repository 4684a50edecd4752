//! The `mathtutor export`, `import` and `reset` commands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use mathtutor_core::transfer::default_export_file_name;

use crate::session::Session;
use crate::GlobalArgs;

pub async fn export(global: &GlobalArgs, output: Option<PathBuf>) -> Result<()> {
    let session = Session::open(global, false).await?;
    let path = output.unwrap_or_else(|| PathBuf::from(default_export_file_name(session.today())));

    let json = session
        .tutor
        .export(Utc::now())
        .to_json()
        .context("failed to serialize progress")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    println!(
        "Exported {} solved task(s) to {}",
        session.tutor.progress().total_solved(),
        path.display()
    );
    session.close();
    Ok(())
}

pub async fn import(global: &GlobalArgs, file: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut session = Session::open(global, false).await?;
    session
        .tutor
        .import(&content)
        .with_context(|| format!("failed to import {}", file.display()))?;

    let stats = session.tutor.stats();
    println!(
        "Imported progress: {} solved task(s), {} achievement(s).",
        session.tutor.progress().total_solved(),
        stats.achievements.len()
    );
    session.close();
    Ok(())
}

pub async fn reset(global: &GlobalArgs, yes: bool) -> Result<()> {
    if !yes {
        bail!("this erases all progress and cannot be undone; pass --yes to confirm");
    }

    let mut session = Session::open(global, false).await?;
    session.tutor.reset();
    println!("Progress reset.");
    session.close();
    Ok(())
}
