//! Write projection report JSON files.
//!
//! The report is the portable form of a run: configuration highlights, where
//! each table came from, and the full-precision projected rows. The schema is
//! defined by `domain::ProjectionReport`.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::app::pipeline::ProjectionRun;
use crate::domain::{ProjectionConfig, ProjectionReport};
use crate::error::AppError;

pub fn build_report(run: &ProjectionRun, config: &ProjectionConfig) -> ProjectionReport {
    let sources = BTreeMap::from([
        ("salary".to_string(), run.tables.salaries.describe()),
        ("demand".to_string(), run.tables.demand.describe()),
        ("geographic".to_string(), run.tables.geographic.describe()),
        ("skills".to_string(), run.tables.skills.describe()),
    ]);

    ProjectionReport {
        tool: "salcast".to_string(),
        generated_at: Utc::now(),
        base_year: run.base_year,
        year: run.year,
        inflation_rate: config.inflation_rate,
        sources,
        rows: run.rows.clone(),
        failures: run.failures.clone(),
    }
}

/// Write a projection report JSON file.
pub fn write_report_json(path: &Path, run: &ProjectionRun, config: &ProjectionConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &build_report(run, config))
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}
