//! JSON export of the run summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::config::Parameters;
use crate::state::RunSummary;

/// Summary export structure
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport<'a> {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    /// Parameters the run used
    pub parameters: &'a Parameters,
    /// Run statistics
    pub summary: &'a RunSummary,
}

/// Write the run summary to the configured summary file
///
/// Returns `None` when the summary is disabled in the output parameters.
pub fn export_summary_json(params: &Parameters, summary: &RunSummary) -> Result<Option<PathBuf>> {
    let Some(name) = params.output.summary.as_deref() else {
        return Ok(None);
    };
    let path = params.output.resolve(name);
    export_summary_json_to(params, summary, &path)?;
    Ok(Some(path))
}

/// Write the run summary to a specific file
pub fn export_summary_json_to(params: &Parameters, summary: &RunSummary, path: &Path) -> Result<()> {
    let export = SummaryExport {
        exported_at: Local::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        parameters: params,
        summary,
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating summary file {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export)?;

    log::info!("Run summary exported: {}", path.display());
    Ok(())
}
