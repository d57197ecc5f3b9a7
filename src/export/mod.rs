// ============================================================================
// src/export/mod.rs - CSV / JSON export of the filtered project list
// ============================================================================
//
// Exports render to a `String` first and are then written atomically: the
// content goes to a temp file in the destination directory, is synced, and
// is renamed over the target. A failed export never leaves a partial file.
//
// ============================================================================

use crate::core::{DashboardError, Project, Result};
use crate::filter::FilterSpec;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

pub const CSV_HEADER: &str = "ID,Name,Department,Region,Status,Phase,Owner,Start Date,End Date,\
Budget Allocated,Budget Spent,Risk,Reward,Efficiency,Delay Days,Progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "projects-export.csv",
            ExportFormat::Json => "dashboard-export.json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(DashboardError::Parse(format!("unknown export format '{}'", other))),
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// One header line plus one line per project, newline separated, no
/// trailing newline. Names are wrapped in double quotes; dates are
/// `YYYY-MM-DD`.
pub fn to_csv(projects: &[Project]) -> String {
    let mut lines = Vec::with_capacity(projects.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(projects.iter().map(csv_row));
    lines.join("\n")
}

fn csv_row(p: &Project) -> String {
    format!(
        "{},\"{}\",{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        p.id,
        p.name,
        p.department,
        p.region,
        p.status,
        p.phase,
        p.owner,
        p.start_date.format("%Y-%m-%d"),
        p.end_date.format("%Y-%m-%d"),
        p.budget_allocated,
        p.budget_spent,
        p.risk,
        p.reward,
        p.efficiency,
        p.delay_days,
        p.progress,
    )
}

#[derive(Serialize)]
struct DashboardExport<'a> {
    projects: &'a [Project],
    filters: &'a FilterSpec,
}

/// Pretty-printed `{ "projects": [...], "filters": {...} }`
pub fn to_json(projects: &[Project], filters: &FilterSpec) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DashboardExport { projects, filters })?)
}

pub fn project_to_json(project: &Project) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// `project-{id}.json`
pub fn project_filename(project: &Project) -> String {
    format!("project-{}.json", project.id)
}

// ============================================================================
// FILE OUTPUT
// ============================================================================

/// Write `contents` to `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, contents: &str) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let mut temp = NamedTempFile::new_in(&parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(path.to_path_buf())
}
