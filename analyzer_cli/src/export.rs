use std::path::Path;

use analyzer_core::{AnalysisError, AnalysisReport};

/// Writes the flat metric table as CSV: one row per date, one column per
/// metric, warm-up entries left empty.
pub fn export_table(report: &AnalysisReport, path: &Path) -> Result<(), AnalysisError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AnalysisError::SourceFormat(format!("cannot write {}: {}", path.display(), e))
    })?;
    for row in report.rows() {
        writer.serialize(row).map_err(|e| {
            AnalysisError::SourceFormat(format!("cannot write {}: {}", path.display(), e))
        })?;
    }
    writer.flush().map_err(|e| {
        AnalysisError::SourceFormat(format!("cannot write {}: {}", path.display(), e))
    })?;
    Ok(())
}
