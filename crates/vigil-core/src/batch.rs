use crate::model::{BatchReport, BatchSummary, Document, ScanResult, SkippedDocument};
use crate::rules::{self, RuleError};
use crate::scanner;
use crate::scoring;
use rayon::prelude::*;
use tracing::info;
use vigil_config::Config;

/// Scans an ordered collection of documents and aggregates one BatchReport.
/// The registry is built once up front, so malformed rule configuration
/// fails before any document is touched.
pub fn run_batch(documents: &[Document], config: &Config) -> Result<BatchReport, RuleError> {
    run_batch_with_skipped(documents, Vec::new(), config)
}

/// Batch run with pre-recorded skips (documents that failed to load).
/// Skipped entries never contribute to `perFile` or the summary.
pub(crate) fn run_batch_with_skipped(
    documents: &[Document],
    skipped: Vec<SkippedDocument>,
    config: &Config,
) -> Result<BatchReport, RuleError> {
    let rules = rules::get_all_rules(config)?;

    // Each scan is pure and owns its output, so the fan-out needs no
    // locking; collect() keeps input order for the perFile mapping.
    let results: Vec<(String, ScanResult)> = if config.scan.parallel {
        documents
            .par_iter()
            .map(|doc| (doc.id.clone(), scanner::scan_document(doc, &rules, config)))
            .collect()
    } else {
        documents
            .iter()
            .map(|doc| (doc.id.clone(), scanner::scan_document(doc, &rules, config)))
            .collect()
    };

    Ok(assemble_report(results, skipped))
}

fn assemble_report(
    results: Vec<(String, ScanResult)>,
    skipped: Vec<SkippedDocument>,
) -> BatchReport {
    let total_files = results.len();
    let total_findings: usize = results.iter().map(|(_, r)| r.findings.len()).sum();
    let high_risk_file_count = results
        .iter()
        .filter(|(_, r)| scoring::is_high_risk(r.risk_score))
        .count();
    let average_risk_score = if results.is_empty() {
        0
    } else {
        let sum: u32 = results.iter().map(|(_, r)| r.risk_score).sum();
        (f64::from(sum) / total_files as f64).round() as u32
    };

    let summary = BatchSummary {
        total_files,
        total_findings,
        high_risk_file_count,
        average_risk_score,
    };
    let recommendations = derive_recommendations(&summary);

    info!(
        total_files,
        total_findings,
        high_risk_files = high_risk_file_count,
        skipped = skipped.len(),
        "batch scan complete"
    );

    BatchReport {
        per_file: results.into_iter().collect(),
        summary,
        recommendations,
        skipped,
    }
}

/// The fixed recommendation ladder: threshold-gated entries first, then the
/// general guidance every report carries.
pub fn derive_recommendations(summary: &BatchSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.total_findings > 10 {
        recommendations.push(
            "High finding volume: schedule an immediate security review of this codebase"
                .to_string(),
        );
    }
    if summary.high_risk_file_count > 0 {
        recommendations.push(format!(
            "{} file(s) scored above the high-risk threshold; remediate those files first",
            summary.high_risk_file_count
        ));
    }
    if summary.average_risk_score > 50 {
        recommendations.push(
            "Average risk is elevated across the batch; adopt hardening practices beyond individual fixes"
                .to_string(),
        );
    }

    recommendations.push("Integrate scanning into CI so new findings block merges".to_string());
    recommendations.push("Train developers on the most common vulnerability classes".to_string());
    recommendations.push("Schedule recurring security audits of high-churn code".to_string());

    recommendations
}
