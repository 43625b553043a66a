use serde::Serialize;

use crate::model::BatchReport;
use crate::report::{Render, RenderError};

/// Bumped whenever the report shape changes incompatibly.
pub const SCHEMA_VERSION: &str = "vigil-v1";

/// Machine-readable output. The report is emitted verbatim under a
/// `schemaVersion` wrapper so consumers can detect shape changes.
pub struct JsonRenderer;

#[derive(Serialize)]
struct VersionedReport<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: &'static str,
    #[serde(flatten)]
    report: &'a BatchReport,
}

impl Render for JsonRenderer {
    fn render(&self, report: &BatchReport) -> Result<String, RenderError> {
        let versioned = VersionedReport {
            schema_version: SCHEMA_VERSION,
            report,
        };
        Ok(serde_json::to_string_pretty(&versioned)?)
    }
}

// ==========================
// Tests
// ==========================
