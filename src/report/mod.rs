pub mod json;
pub mod md;

use crate::error::{AppError, Result};
use crate::types::report::{BlendedResult, HeuristicReport};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(result: &BlendedResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(AppError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result)),
    }
}

pub fn render_heuristic(report: &HeuristicReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::heuristic_to_json(report).map_err(AppError::Json),
        OutputFormat::Md => Ok(md::heuristic_to_markdown(report)),
    }
}

/// Writes a rendered report, creating missing parent directories.
pub fn write_output(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(AppError::Io)?;
    }
    fs::write(path, rendered).map_err(AppError::Io)?;
    info!(path = %path.display(), bytes = rendered.len(), "report written");
    Ok(())
}
